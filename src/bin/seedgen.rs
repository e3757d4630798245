// src/bin/seedgen.rs
//
// Emits seed SQL for clinics/doctors/patients plus a multi-month appointment
// set for exercising the report screens. Deterministic on purpose: v5 UUIDs in
// a fixed namespace and a fixed RNG seed, so reruns produce identical SQL and
// FKs resolve across partial loads (every INSERT is ON CONFLICT DO NOTHING).
//
// Run: cargo run --bin seedgen > seed-test-data.sql

use rand::{Rng, SeedableRng, rngs::StdRng};
use uuid::Uuid;

const NAMESPACE: Uuid = uuid::uuid!("a0eebc99-9c0b-4ef8-bb6d-6bb9bd380a11");

const STATUSES: [&str; 4] = ["scheduled", "completed", "cancelled", "no_show"];

struct Clinic {
    tag: &'static str,
    name: &'static str,
    address: &'static str,
    contact: &'static str,
    timezone: &'static str,
}

struct Doctor {
    tag: &'static str,
    clinic_tag: &'static str,
    name: &'static str,
    specialty: &'static str,
}

struct Patient {
    tag: &'static str,
    name: &'static str,
    contact: &'static str,
    dob: &'static str,
}

const CLINICS: [Clinic; 3] = [
    Clinic { tag: "clinic-tokyo", name: "Tokyo Central Clinic", address: "1-1 Marunouchi, Chiyoda", contact: "+81-3-5555-0101", timezone: "Asia/Tokyo" },
    Clinic { tag: "clinic-nairobi", name: "Nairobi Health Centre", address: "Kenyatta Ave 12", contact: "+254-20-555-0102", timezone: "Africa/Nairobi" },
    Clinic { tag: "clinic-berlin", name: "Berlin Praxis Mitte", address: "Friedrichstr. 60", contact: "+49-30-5550-103", timezone: "Europe/Berlin" },
];

const DOCTORS: [Doctor; 5] = [
    Doctor { tag: "doc-sato", clinic_tag: "clinic-tokyo", name: "Dr. Yuki Sato", specialty: "Internal Medicine" },
    Doctor { tag: "doc-tanaka", clinic_tag: "clinic-tokyo", name: "Dr. Hana Tanaka", specialty: "Infectious Disease" },
    Doctor { tag: "doc-odhiambo", clinic_tag: "clinic-nairobi", name: "Dr. Brian Odhiambo", specialty: "Epidemiology" },
    Doctor { tag: "doc-wanjiku", clinic_tag: "clinic-nairobi", name: "Dr. Grace Wanjiku", specialty: "General Practice" },
    Doctor { tag: "doc-krause", clinic_tag: "clinic-berlin", name: "Dr. Lena Krause", specialty: "Pulmonology" },
];

const PATIENTS: [Patient; 8] = [
    Patient { tag: "pat-01", name: "Kenji Watanabe", contact: "kenji@example.com", dob: "1978-04-12" },
    Patient { tag: "pat-02", name: "Aiko Mori", contact: "aiko@example.com", dob: "1991-11-03" },
    Patient { tag: "pat-03", name: "Samuel Mwangi", contact: "samuel@example.com", dob: "1985-02-22" },
    Patient { tag: "pat-04", name: "Faith Njeri", contact: "faith@example.com", dob: "2001-07-30" },
    Patient { tag: "pat-05", name: "Jonas Weber", contact: "jonas@example.com", dob: "1969-09-14" },
    Patient { tag: "pat-06", name: "Clara Fischer", contact: "clara@example.com", dob: "1995-01-08" },
    Patient { tag: "pat-07", name: "Ravi Sharma", contact: "ravi@example.com", dob: "1988-06-19" },
    Patient { tag: "pat-08", name: "Mei Lin", contact: "mei@example.com", dob: "1999-12-27" },
];

// (country, continent, avg monthly temp °C) pools per data set
const ASIA: [(&str, &str, f64); 3] = [
    ("Japan", "Asia", 5.2),
    ("India", "Asia", 18.6),
    ("China", "Asia", 2.1),
];
const AFRICA: [(&str, &str, f64); 3] = [
    ("Kenya", "Africa", 24.3),
    ("Nigeria", "Africa", 27.9),
    ("DR Congo", "Africa", 25.5),
];
const WORLDWIDE: [(&str, &str, f64); 6] = [
    ("Japan", "Asia", 14.0),
    ("Kenya", "Africa", 22.8),
    ("Germany", "Europe", 11.4),
    ("Brazil", "South America", 23.7),
    ("United States", "North America", 16.2),
    ("Australia", "Oceania", 15.9),
];

fn uuid5(tag: &str) -> Uuid {
    Uuid::new_v5(&NAMESPACE, tag.as_bytes())
}

fn esc(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

fn num_or_null(v: Option<f64>) -> String {
    v.map(|v| v.to_string()).unwrap_or_else(|| "NULL".to_string())
}

struct SeedAppointment {
    tag: String,
    clinic_tag: &'static str,
    doctor_tag: &'static str,
    patient_tag: &'static str,
    start: String,
    status: &'static str,
    disease: Option<&'static str>,
    virality: Option<f64>,
    age: Option<i32>,
    temp: Option<f64>,
    country: Option<&'static str>,
    continent: Option<&'static str>,
}

fn gen_set(
    rng: &mut StdRng,
    set_tag: &str,
    count: usize,
    months: &[u32],
    disease: &'static str,
    virality: f64,
    geo_pool: &[(&'static str, &'static str, f64)],
) -> Vec<SeedAppointment> {
    let mut out = Vec::with_capacity(count);
    for i in 0..count {
        let month = months[rng.gen_range(0..months.len())];
        let day = rng.gen_range(1..=27);
        let hour = rng.gen_range(8..18);
        let (country, continent, temp) = geo_pool[rng.gen_range(0..geo_pool.len())];
        let doctor = &DOCTORS[rng.gen_range(0..DOCTORS.len())];
        let patient = &PATIENTS[rng.gen_range(0..PATIENTS.len())];

        // a slice of rows with missing optional fields keeps the Unknown
        // bucket and the empty CSV cells exercised
        let sparse = rng.gen_bool(0.15);

        out.push(SeedAppointment {
            tag: format!("{set_tag}-{i:03}"),
            clinic_tag: doctor.clinic_tag,
            doctor_tag: doctor.tag,
            patient_tag: patient.tag,
            start: format!("2025-{month:02}-{day:02}T{hour:02}:00:00Z"),
            status: STATUSES[rng.gen_range(0..STATUSES.len())],
            disease: if sparse { None } else { Some(disease) },
            virality: if sparse { None } else { Some(virality) },
            age: if sparse { None } else { Some(rng.gen_range(4..90)) },
            temp: if sparse { None } else { Some(temp) },
            country: if sparse { None } else { Some(country) },
            continent: if sparse { None } else { Some(continent) },
        });
    }
    out
}

fn main() {
    let mut rng = StdRng::seed_from_u64(20250101);

    let mut appointments = Vec::new();
    appointments.extend(gen_set(&mut rng, "jan-covid-asia", 40, &[1], "COVID", 2.4, &ASIA));
    appointments.extend(gen_set(&mut rng, "feb-ebola-africa", 30, &[2], "Ebola", 1.8, &AFRICA));
    appointments.extend(gen_set(
        &mut rng,
        "mar-sep-covid-worldwide",
        70,
        &[3, 4, 5, 6, 7, 8, 9],
        "COVID",
        2.1,
        &WORLDWIDE,
    ));

    println!("-- Generated by seedgen; deterministic, safe to re-run.");
    println!("-- Load order matters: clinics, doctors, patients, appointments.");
    println!();

    println!("INSERT INTO clinics (id, name, address, contact, timezone, is_active) VALUES");
    let clinic_rows: Vec<String> = CLINICS
        .iter()
        .map(|c| {
            format!(
                "  ('{}', {}, {}, {}, {}, true)",
                uuid5(c.tag),
                esc(c.name),
                esc(c.address),
                esc(c.contact),
                esc(c.timezone)
            )
        })
        .collect();
    println!("{} ON CONFLICT (id) DO NOTHING;", clinic_rows.join(",\n"));
    println!();

    println!("INSERT INTO doctors (id, clinic_id, name, specialty) VALUES");
    let doctor_rows: Vec<String> = DOCTORS
        .iter()
        .map(|d| {
            format!(
                "  ('{}', '{}', {}, {})",
                uuid5(d.tag),
                uuid5(d.clinic_tag),
                esc(d.name),
                esc(d.specialty)
            )
        })
        .collect();
    println!("{} ON CONFLICT (id) DO NOTHING;", doctor_rows.join(",\n"));
    println!();

    println!("INSERT INTO patients (id, name, contact, date_of_birth) VALUES");
    let patient_rows: Vec<String> = PATIENTS
        .iter()
        .map(|p| {
            format!(
                "  ('{}', {}, {}, '{}')",
                uuid5(p.tag),
                esc(p.name),
                esc(p.contact),
                p.dob
            )
        })
        .collect();
    println!("{} ON CONFLICT (id) DO NOTHING;", patient_rows.join(",\n"));
    println!();

    println!(
        "INSERT INTO appointments (id, clinic_id, doctor_id, patient_id, start_at, duration_minutes, status, disease_name, virality_rate, patient_age_at_visit, avg_monthly_city_temp, country, continent) VALUES"
    );
    let appointment_rows: Vec<String> = appointments
        .iter()
        .map(|a| {
            format!(
                "  ('{}', '{}', '{}', '{}', '{}'::timestamptz, 30, {}, {}, {}, {}, {}, {}, {})",
                uuid5(&a.tag),
                uuid5(a.clinic_tag),
                uuid5(a.doctor_tag),
                uuid5(a.patient_tag),
                a.start,
                esc(a.status),
                a.disease.map(esc).unwrap_or_else(|| "NULL".to_string()),
                num_or_null(a.virality),
                a.age.map(|v| v.to_string()).unwrap_or_else(|| "NULL".to_string()),
                num_or_null(a.temp),
                a.country.map(esc).unwrap_or_else(|| "NULL".to_string()),
                a.continent.map(esc).unwrap_or_else(|| "NULL".to_string()),
            )
        })
        .collect();
    println!("{} ON CONFLICT (id) DO NOTHING;", appointment_rows.join(",\n"));

    eprintln!(
        "clinics: {}  doctors: {}  patients: {}  appointments: {}",
        CLINICS.len(),
        DOCTORS.len(),
        PATIENTS.len(),
        appointments.len()
    );
}
