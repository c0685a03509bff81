//! Static grant catalogue used by the mock matching strategy

use chrono::NaiveDate;

use crate::types::{Deadline, GrantMatch};

const CATALOGUE: &[(&str, &str, &str, (i32, u32, u32), &str)] = &[
    (
        "Small Business Innovation Research (SBIR) Phase I",
        "National Science Foundation",
        "Supports R&D projects with commercial potential in science and technology sectors. Focus on early-stage innovation.",
        (2025, 9, 15),
        "$50,000 - $250,000",
    ),
    (
        "Community Development Block Grant",
        "U.S. Department of Housing and Urban Development",
        "Funding for community development activities directed toward neighborhood revitalization, economic development, and improved facilities.",
        (2025, 8, 30),
        "$100,000 - $500,000",
    ),
    (
        "Climate Action Innovation Fund",
        "Environmental Protection Agency",
        "Supports projects that reduce greenhouse gas emissions and promote sustainable practices in communities.",
        (2025, 10, 1),
        "$75,000 - $300,000",
    ),
    (
        "Digital Equity Competitive Grant Program",
        "National Telecommunications and Information Administration",
        "Funding to promote digital inclusion and access to broadband for underserved communities.",
        (2025, 9, 20),
        "$50,000 - $200,000",
    ),
    (
        "Arts and Culture Recovery Grant",
        "National Endowment for the Arts",
        "Supports nonprofit arts organizations recovering from economic disruption and building sustainable operations.",
        (2025, 8, 25),
        "$25,000 - $150,000",
    ),
    (
        "Rural Business Development Grant",
        "U.S. Department of Agriculture",
        "Provides grants to support targeted technical assistance, training, and planning activities for small rural businesses.",
        (2025, 9, 10),
        "$50,000 - $250,000",
    ),
    (
        "Education Innovation and Research Program",
        "U.S. Department of Education",
        "Funding for innovative educational practices that improve student achievement and close achievement gaps.",
        (2025, 10, 15),
        "$100,000 - $400,000",
    ),
    (
        "Health Equity Grant Program",
        "Health Resources and Services Administration",
        "Supports projects that address health disparities and improve access to healthcare in underserved populations.",
        (2025, 9, 5),
        "$75,000 - $350,000",
    ),
    (
        "Clean Energy Transition Fund",
        "Department of Energy",
        "Grants for projects that accelerate the transition to renewable energy and energy efficiency in local communities.",
        (2025, 10, 20),
        "$150,000 - $500,000",
    ),
    (
        "Food Security and Nutrition Grant",
        "U.S. Department of Agriculture",
        "Supports programs that improve food access, nutrition education, and food security in low-income communities.",
        (2025, 8, 28),
        "$50,000 - $200,000",
    ),
];

/// The fixed ten-grant catalogue, ids 1 through 10
pub fn mock_grants() -> Vec<GrantMatch> {
    CATALOGUE
        .iter()
        .enumerate()
        .map(|(index, (title, funder, description, (y, m, d), amount))| GrantMatch {
            id: index as u32 + 1,
            title: title.to_string(),
            funder: funder.to_string(),
            description: description.to_string(),
            deadline: NaiveDate::from_ymd_opt(*y, *m, *d)
                .map(Deadline::On)
                .unwrap_or(Deadline::Rolling),
            amount: amount.to_string(),
            url: None,
        })
        .collect()
}
