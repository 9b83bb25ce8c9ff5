use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use clinic_records::config::Config;
use clinic_records::models::{Gender, Prescription};
use clinic_records::store::{self, StoreError};
use clinic_records::utils::dates::{first_day_of_month, today};
use envconfig::Envconfig;
use rand::seq::SliceRandom;
use rand::Rng;

type Error = Box<dyn std::error::Error + Send + Sync>;

const PATIENT_NAMES: &[&str] = &[
    "Alice Johnson",
    "Bob Martinez",
    "Carol Nguyen",
    "David Okafor",
    "Eva Schmidt",
    "Farid Haddad",
    "Grace Kim",
    "Hiro Tanaka",
    "Isabel Costa",
    "Jonas Berg",
];

/// Diagnosis paired with the medicines usually prescribed for it.
const TREATMENTS: &[(&str, &str)] = &[
    ("Seasonal flu", "Paracetamol 500mg three times daily for 5 days"),
    ("Type 2 diabetes", "Metformin 500mg twice daily"),
    ("Hypertension", "Lisinopril 10mg once daily"),
    ("Hypothyroidism", "Levothyroxine 50mcg every morning"),
    ("Acid reflux", "Omeprazole 20mg before breakfast"),
    ("Asthma", "Albuterol inhaler as needed"),
    ("Bacterial sinusitis", "Amoxicillin 500mg three times daily for 7 days"),
    ("Neuropathic pain", "Gabapentin 300mg at bedtime"),
];

const GENDERS: &[Gender] = &[Gender::Male, Gender::Female, Gender::Other];

fn random_date(rng: &mut impl Rng, from: NaiveDate, to: NaiveDate) -> NaiveDate {
    let span = (to - from).num_days().max(0);
    from + Duration::days(rng.gen_range(0..=span))
}

fn get_seed_data(count: usize, today: NaiveDate, now: NaiveDateTime) -> Vec<Prescription> {
    let mut rng = rand::thread_rng();
    let month_start = first_day_of_month(today);

    let mut prescriptions: Vec<Prescription> = (1..=count)
        .map(|id| {
            let prescription_date = random_date(&mut rng, month_start, today);
            let treatment = TREATMENTS.choose(&mut rng).copied();
            // Roughly one in five visits has no recorded diagnosis.
            let treatment = treatment.filter(|_| rng.gen_bool(0.8));
            let next_visit_date = rng
                .gen_bool(0.5)
                .then(|| prescription_date + Duration::days(rng.gen_range(7..=30)));

            Prescription {
                id: id as i64,
                prescription_date,
                patient_name: PATIENT_NAMES
                    .choose(&mut rng)
                    .copied()
                    .unwrap_or("Unknown patient")
                    .to_string(),
                patient_age: rng.gen_range(1..=90),
                patient_gender: GENDERS.choose(&mut rng).copied().unwrap_or(Gender::Other),
                diagnosis: treatment.map(|(diagnosis, _)| diagnosis.to_string()),
                medicines: treatment.map(|(_, medicines)| medicines.to_string()),
                next_visit_date,
                created_by_username: Some("seed".to_string()),
                created_by_full_name: Some("Seed Data".to_string()),
                created_at: Some(now),
                updated_at: Some(now),
            }
        })
        .collect();

    // Same order as the list endpoint: newest first.
    prescriptions.sort_by(|a, b| b.prescription_date.cmp(&a.prescription_date));
    prescriptions
}

fn seed_snapshot(config: &Config) -> Result<usize, StoreError> {
    let now = Local::now().naive_local();
    let prescriptions = get_seed_data(config.seed_count, today(), now);
    store::save_prescriptions(config.data_path(), &prescriptions)?;
    Ok(prescriptions.len())
}

fn main() -> Result<(), Error> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenvy::dotenv().ok();

    let config = Config::init_from_env()?;
    let written = seed_snapshot(&config)?;
    log::info!(
        "Seeded {} prescription(s) into {}",
        written,
        config.data_path().display()
    );
    Ok(())
}
