//! Generated employee dataset

use chrono::{Duration, NaiveDate, NaiveTime};
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::json;

use crate::filter::Record;

const DEPARTMENTS: &[&str] = &["Engineering", "HR", "Finance", "Marketing", "Sales"];

const ROLES: &[&str] = &[
    "Junior Developer",
    "Senior Developer",
    "Team Lead",
    "Manager",
    "Analyst",
    "HR Executive",
    "Product Manager",
];

const CITIES: &[(&str, &str, &str)] = &[
    ("San Francisco", "CA", "USA"),
    ("New York", "NY", "USA"),
    ("Austin", "TX", "USA"),
    ("Seattle", "WA", "USA"),
    ("Chicago", "IL", "USA"),
];

const SKILLS: &[&str] = &[
    "React",
    "TypeScript",
    "Node.js",
    "GraphQL",
    "AWS",
    "Docker",
    "Kubernetes",
    "Python",
    "SQL",
    "Next.js",
];

fn base_salary(department: &str) -> u32 {
    match department {
        "Engineering" => 90_000,
        "Finance" => 80_000,
        "Marketing" => 70_000,
        "Sales" => 65_000,
        _ => 60_000,
    }
}

/// Uniform timestamp between two dates, RFC 3339 in UTC
fn random_timestamp<R: Rng>(rng: &mut R, start: NaiveDate, end: NaiveDate) -> String {
    let span = (end - start).num_seconds().max(1);
    let instant = start.and_time(NaiveTime::MIN) + Duration::seconds(rng.gen_range(0..span));
    instant.and_utc().to_rfc3339()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

/// Generates `count` employee records in the nested shape the schema reads
pub fn generate<R: Rng>(count: usize, rng: &mut R) -> Vec<Record> {
    (1..=count)
        .map(|n| {
            let department = DEPARTMENTS[rng.gen_range(0..DEPARTMENTS.len())];
            let role = ROLES[rng.gen_range(0..ROLES.len())];
            let (city, state, country) = CITIES[rng.gen_range(0..CITIES.len())];

            let mut skills = SKILLS.to_vec();
            skills.shuffle(rng);
            skills.truncate(rng.gen_range(2..=5));

            let rating = (rng.gen_range(30..=50) as f64) / 10.0;

            json!({
                "id": format!("emp_{}", n),
                "name": format!("Employee {}", n),
                "email": format!("employee{}@company.com", n),
                "department": department,
                "role": role,
                "salary": base_salary(department) + rng.gen_range(0..40_000),
                "joinDate": random_timestamp(rng, date(2018, 1, 1), date(2023, 12, 31)),
                "isActive": rng.gen_bool(0.8),
                "skills": skills,
                "address": {"city": city, "state": state, "country": country},
                "projects": rng.gen_range(1..=8),
                "lastReview": random_timestamp(rng, date(2023, 1, 1), date(2025, 1, 1)),
                "performanceRating": rating,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::coerce::parse_date;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let records = generate(25, &mut rng);

        assert_eq!(records.len(), 25);
        assert_eq!(records[0]["id"], "emp_1");
        assert_eq!(records[24]["email"], "employee25@company.com");

        for record in &records {
            let skills = record["skills"].as_array().unwrap();
            assert!((2..=5).contains(&skills.len()));

            let salary = record["salary"].as_u64().unwrap();
            assert!((60_000..130_000).contains(&salary));

            let rating = record["performanceRating"].as_f64().unwrap();
            assert!((3.0..=5.0).contains(&rating));

            assert!(parse_date(record["joinDate"].as_str().unwrap()).is_some());
            assert!(record["address"]["city"].is_string());
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let a = generate(5, &mut StdRng::seed_from_u64(42));
        let b = generate(5, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
