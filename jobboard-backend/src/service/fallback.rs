use chrono::{DateTime, Duration, Utc};
use jobboard_core::{format_timestamp, JobType, Listing, ListingStatus, Location};

struct Sample {
    title: &'static str,
    company: &'static str,
    location: Location,
    job_type: JobType,
    salary: &'static str,
    description: &'static str,
    deadline_in_days: i64,
    posted_hours_ago: i64,
}

const SAMPLES: [Sample; 4] = [
    Sample {
        title: "Full Stack Developer",
        company: "Amazon",
        location: Location::Bangalore,
        job_type: JobType::FullTime,
        salary: "₹70L - ₹90L",
        description: "A user-friendly interface lets you browse stunning photos and videos. Filter destinations based on interests and travel style, and create personalized itineraries.",
        deadline_in_days: 30,
        posted_hours_ago: 20,
    },
    Sample {
        title: "Node.js Developer",
        company: "Google",
        location: Location::Mumbai,
        job_type: JobType::FullTime,
        salary: "₹60L - ₹80L",
        description: "Join our backend team to build scalable APIs and microservices. Work with cutting-edge technologies and contribute to products used by millions.",
        deadline_in_days: 25,
        posted_hours_ago: 20,
    },
    Sample {
        title: "UX/UI Designer",
        company: "Microsoft",
        location: Location::Delhi,
        job_type: JobType::FullTime,
        salary: "₹55L - ₹75L",
        description: "Create intuitive and beautiful user experiences for our enterprise software products. Collaborate with product managers and engineers.",
        deadline_in_days: 35,
        posted_hours_ago: 20,
    },
    Sample {
        title: "Frontend Developer",
        company: "Meta",
        location: Location::Pune,
        job_type: JobType::Contract,
        salary: "₹50L - ₹70L",
        description: "Build responsive and interactive user interfaces using React and modern frontend technologies. Focus on performance and user experience.",
        deadline_in_days: 20,
        posted_hours_ago: 24,
    },
];

/// Sample listings served when the store cannot supply any. Deadlines and
/// creation times are relative to `now`.
pub fn sample_listings(now: DateTime<Utc>) -> Vec<Listing> {
    SAMPLES
        .iter()
        .enumerate()
        .map(|(i, s)| Listing {
            id: format!("sample-{}", i + 1),
            title: s.title.to_string(),
            company_name: s.company.to_string(),
            location: s.location.to_string(),
            job_type: s.job_type.to_string(),
            salary_range: s.salary.to_string(),
            description: s.description.to_string(),
            application_deadline: format_timestamp(&(now + Duration::days(s.deadline_in_days))),
            status: ListingStatus::Published.to_string(),
            created_at: format_timestamp(&(now - Duration::hours(s.posted_hours_ago))),
            updated_at: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_are_published_and_well_formed() {
        let listings = sample_listings(Utc::now());
        assert_eq!(listings.len(), 4);
        assert!(listings.iter().all(Listing::is_published));
        assert_eq!(listings[0].id, "sample-1");
        assert_eq!(listings[3].company_name, "Meta");
        for l in &listings {
            assert!(jobboard_core::SalaryRange::parse(&l.salary_range).is_some());
        }
    }
}
