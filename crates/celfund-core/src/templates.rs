//! Template grant generation
//!
//! When the matching backend is unreachable or returns nothing, results are
//! synthesized from a fixed per-focus-area table. Generation is pure: the
//! same focus area, organization type and `today` always yield the same list.

use chrono::{Days, NaiveDate};

use crate::types::{Deadline, FocusArea, GrantMatch, OrganizationType};

/// Upper bound on the number of template grants returned
pub const TEMPLATE_LIMIT: usize = 10;

/// Days until the first template deadline
pub const FIRST_DEADLINE_DAYS: u64 = 30;

/// Days between consecutive template deadlines
pub const DEADLINE_STEP_DAYS: u64 = 12;

/// Placeholder replaced by [`OrganizationType::audience`]
const ORG_PLACEHOLDER: &str = "{org}";

struct GrantTemplate {
    title: &'static str,
    funder: &'static str,
    description: &'static str,
    amount: &'static str,
    url: &'static str,
}

const CLIMATE: &[GrantTemplate] = &[
    GrantTemplate {
        title: "Climate Action Innovation Fund",
        funder: "Environmental Protection Agency",
        description: "Supports {org} reducing greenhouse gas emissions and promoting sustainable practices in their communities.",
        amount: "$75,000 - $300,000",
        url: "https://www.epa.gov/grants",
    },
    GrantTemplate {
        title: "Clean Energy Transition Fund",
        funder: "Department of Energy",
        description: "Grants for {org} accelerating the transition to renewable energy and energy efficiency.",
        amount: "$150,000 - $500,000",
        url: "https://www.energy.gov/funding-financing",
    },
    GrantTemplate {
        title: "Environmental Education Grants",
        funder: "Environmental Protection Agency",
        description: "Helps {org} run projects that increase public awareness of environmental issues.",
        amount: "$50,000 - $250,000",
        url: "https://www.epa.gov/education/grants",
    },
    GrantTemplate {
        title: "Community Resilience Partnership",
        funder: "National Oceanic and Atmospheric Administration",
        description: "Funds {org} preparing communities for extreme weather and climate hazards.",
        amount: "$100,000 - $400,000",
        url: "https://www.noaa.gov/grants",
    },
    GrantTemplate {
        title: "Rural Energy for America Program",
        funder: "U.S. Department of Agriculture",
        description: "Supports {org} installing renewable energy systems in rural areas.",
        amount: "$20,000 - $1,000,000",
        url: "https://www.rd.usda.gov/programs-services/energy-programs",
    },
    GrantTemplate {
        title: "Urban Forestry Grant",
        funder: "U.S. Forest Service",
        description: "Helps {org} expand tree canopy and green space in underserved neighborhoods.",
        amount: "$25,000 - $150,000",
        url: "https://www.fs.usda.gov/managing-land/urban-forests",
    },
];

const EDUCATION: &[GrantTemplate] = &[
    GrantTemplate {
        title: "Education Innovation and Research Program",
        funder: "U.S. Department of Education",
        description: "Funding for {org} developing practices that improve student achievement and close achievement gaps.",
        amount: "$100,000 - $400,000",
        url: "https://www.ed.gov/grants",
    },
    GrantTemplate {
        title: "STEM Learning Opportunities Grant",
        funder: "National Science Foundation",
        description: "Supports {org} expanding access to science, technology, engineering, and math education.",
        amount: "$75,000 - $350,000",
        url: "https://www.nsf.gov/funding",
    },
    GrantTemplate {
        title: "Digital Literacy Access Fund",
        funder: "Institute of Museum and Library Services",
        description: "Helps {org} bring digital skills training to learners of all ages.",
        amount: "$25,000 - $150,000",
        url: "https://www.imls.gov/grants",
    },
    GrantTemplate {
        title: "Teacher Quality Partnership",
        funder: "U.S. Department of Education",
        description: "Funds {org} that recruit, prepare, and retain effective teachers.",
        amount: "$150,000 - $500,000",
        url: "https://www.ed.gov/grants",
    },
    GrantTemplate {
        title: "Afterschool Enrichment Grant",
        funder: "National Community Foundation Network",
        description: "Supports {org} running safe, enriching afterschool programs.",
        amount: "$10,000 - $75,000",
        url: "https://www.cof.org/community-foundations",
    },
];

const HEALTH: &[GrantTemplate] = &[
    GrantTemplate {
        title: "Health Equity Grant Program",
        funder: "Health Resources and Services Administration",
        description: "Supports {org} addressing health disparities in underserved populations.",
        amount: "$75,000 - $350,000",
        url: "https://www.hrsa.gov/grants",
    },
    GrantTemplate {
        title: "Community Health Worker Training Program",
        funder: "Centers for Disease Control and Prevention",
        description: "Helps {org} train and deploy community health workers.",
        amount: "$100,000 - $400,000",
        url: "https://www.cdc.gov/grants",
    },
    GrantTemplate {
        title: "Mental Health Awareness Training Grant",
        funder: "Substance Abuse and Mental Health Services Administration",
        description: "Funds {org} that build mental health literacy in their communities.",
        amount: "$50,000 - $200,000",
        url: "https://www.samhsa.gov/grants",
    },
    GrantTemplate {
        title: "Food Security and Nutrition Grant",
        funder: "U.S. Department of Agriculture",
        description: "Supports {org} improving food access and nutrition education in low-income communities.",
        amount: "$50,000 - $200,000",
        url: "https://www.nifa.usda.gov/grants",
    },
    GrantTemplate {
        title: "Rural Health Outreach Program",
        funder: "Health Resources and Services Administration",
        description: "Helps {org} expand health care services in rural areas.",
        amount: "$100,000 - $300,000",
        url: "https://www.hrsa.gov/rural-health",
    },
];

const TECHNOLOGY: &[GrantTemplate] = &[
    GrantTemplate {
        title: "Small Business Innovation Research (SBIR) Phase I",
        funder: "National Science Foundation",
        description: "Supports R&D by {org} with commercial potential in science and technology.",
        amount: "$50,000 - $250,000",
        url: "https://seedfund.nsf.gov",
    },
    GrantTemplate {
        title: "Digital Equity Competitive Grant Program",
        funder: "National Telecommunications and Information Administration",
        description: "Funds {org} promoting digital inclusion and broadband access.",
        amount: "$50,000 - $200,000",
        url: "https://www.ntia.gov/funding-programs",
    },
    GrantTemplate {
        title: "Tech for Good Innovation Fund",
        funder: "Global Tech Corporation CSR",
        description: "Funding for {org} using technology to solve social and environmental challenges.",
        amount: "$50,000 - $150,000",
        url: "https://corporate-foundation.example.com/grants",
    },
    GrantTemplate {
        title: "Open Source Infrastructure Grant",
        funder: "Sovereign Tech Fund",
        description: "Supports {org} maintaining open digital infrastructure used by the public.",
        amount: "$30,000 - $300,000",
        url: "https://www.sovereigntechfund.de",
    },
    GrantTemplate {
        title: "Cybersecurity Capacity Building Grant",
        funder: "Cybersecurity and Infrastructure Security Agency",
        description: "Helps {org} strengthen their cybersecurity posture.",
        amount: "$100,000 - $500,000",
        url: "https://www.cisa.gov/grants",
    },
];

const COMMUNITY: &[GrantTemplate] = &[
    GrantTemplate {
        title: "Community Development Block Grant",
        funder: "U.S. Department of Housing and Urban Development",
        description: "Funding for {org} working on neighborhood revitalization and economic development.",
        amount: "$100,000 - $500,000",
        url: "https://www.hud.gov/program_offices/comm_planning/cdbg",
    },
    GrantTemplate {
        title: "Community Foundation General Operating Support",
        funder: "National Community Foundation Network",
        description: "General operating support for {org} serving underserved communities.",
        amount: "$25,000 - $100,000",
        url: "https://www.cof.org/community-foundations",
    },
    GrantTemplate {
        title: "Rural Business Development Grant",
        funder: "U.S. Department of Agriculture",
        description: "Supports {org} offering technical assistance and training to small rural businesses.",
        amount: "$50,000 - $250,000",
        url: "https://www.rd.usda.gov/programs-services/business-programs",
    },
    GrantTemplate {
        title: "AmeriCorps State and National Grant",
        funder: "AmeriCorps",
        description: "Helps {org} engage volunteers in addressing local community needs.",
        amount: "$75,000 - $400,000",
        url: "https://americorps.gov/partner/funding-opportunities",
    },
    GrantTemplate {
        title: "Affordable Housing Program",
        funder: "Federal Home Loan Bank",
        description: "Funds {org} creating and preserving affordable housing.",
        amount: "$100,000 - $750,000",
        url: "https://www.fhlb.com",
    },
];

const ARTS: &[GrantTemplate] = &[
    GrantTemplate {
        title: "Arts and Culture Recovery Grant",
        funder: "National Endowment for the Arts",
        description: "Supports {org} recovering from economic disruption and building sustainable operations.",
        amount: "$25,000 - $150,000",
        url: "https://www.arts.gov/grants",
    },
    GrantTemplate {
        title: "Grants for Arts Projects",
        funder: "National Endowment for the Arts",
        description: "Project-based funding for {org} creating public engagement with the arts.",
        amount: "$10,000 - $100,000",
        url: "https://www.arts.gov/grants/grants-for-arts-projects",
    },
    GrantTemplate {
        title: "Public Humanities Projects",
        funder: "National Endowment for the Humanities",
        description: "Helps {org} bring the humanities to broad public audiences.",
        amount: "$50,000 - $400,000",
        url: "https://www.neh.gov/grants",
    },
    GrantTemplate {
        title: "California Arts Council Project Grant",
        funder: "California Arts Council",
        description: "Funding for {org} running arts and cultural programs.",
        amount: "$10,000 - $75,000",
        url: "https://www.arts.ca.gov/grants/",
    },
    GrantTemplate {
        title: "Museums for America",
        funder: "Institute of Museum and Library Services",
        description: "Supports {org} strengthening museums as community anchors.",
        amount: "$5,000 - $250,000",
        url: "https://www.imls.gov/grants",
    },
];

const DEFAULT: &[GrantTemplate] = &[
    GrantTemplate {
        title: "Community Foundation General Operating Support",
        funder: "National Community Foundation Network",
        description: "General operating support for {org} serving underserved communities.",
        amount: "$25,000 - $100,000",
        url: "https://www.cof.org/community-foundations",
    },
    GrantTemplate {
        title: "Small Business Innovation Research (SBIR) Phase I",
        funder: "National Science Foundation",
        description: "Supports R&D by {org} with commercial potential in science and technology.",
        amount: "$50,000 - $250,000",
        url: "https://seedfund.nsf.gov",
    },
    GrantTemplate {
        title: "Community Development Block Grant",
        funder: "U.S. Department of Housing and Urban Development",
        description: "Funding for {org} working on neighborhood revitalization and economic development.",
        amount: "$100,000 - $500,000",
        url: "https://www.hud.gov/program_offices/comm_planning/cdbg",
    },
    GrantTemplate {
        title: "Climate Action Innovation Fund",
        funder: "Environmental Protection Agency",
        description: "Supports {org} reducing greenhouse gas emissions and promoting sustainable practices.",
        amount: "$75,000 - $300,000",
        url: "https://www.epa.gov/grants",
    },
    GrantTemplate {
        title: "Health Equity Grant Program",
        funder: "Health Resources and Services Administration",
        description: "Supports {org} addressing health disparities in underserved populations.",
        amount: "$75,000 - $350,000",
        url: "https://www.hrsa.gov/grants",
    },
    GrantTemplate {
        title: "Education Innovation and Research Program",
        funder: "U.S. Department of Education",
        description: "Funding for {org} developing practices that improve student achievement.",
        amount: "$100,000 - $400,000",
        url: "https://www.ed.gov/grants",
    },
    GrantTemplate {
        title: "Arts and Culture Recovery Grant",
        funder: "National Endowment for the Arts",
        description: "Supports {org} building sustainable cultural operations.",
        amount: "$25,000 - $150,000",
        url: "https://www.arts.gov/grants",
    },
    GrantTemplate {
        title: "Tech for Good Innovation Fund",
        funder: "Global Tech Corporation CSR",
        description: "Funding for {org} using technology to solve social challenges.",
        amount: "$50,000 - $150,000",
        url: "https://corporate-foundation.example.com/grants",
    },
    GrantTemplate {
        title: "Rural Business Development Grant",
        funder: "U.S. Department of Agriculture",
        description: "Supports {org} offering technical assistance to small rural businesses.",
        amount: "$50,000 - $250,000",
        url: "https://www.rd.usda.gov/programs-services/business-programs",
    },
    GrantTemplate {
        title: "Food Security and Nutrition Grant",
        funder: "U.S. Department of Agriculture",
        description: "Supports {org} improving food access in low-income communities.",
        amount: "$50,000 - $200,000",
        url: "https://www.nifa.usda.gov/grants",
    },
];

fn table_for(focus_area: FocusArea) -> &'static [GrantTemplate] {
    match focus_area {
        FocusArea::Climate => CLIMATE,
        FocusArea::Education => EDUCATION,
        FocusArea::Health => HEALTH,
        FocusArea::Technology => TECHNOLOGY,
        FocusArea::Community => COMMUNITY,
        FocusArea::Arts => ARTS,
        FocusArea::Other => DEFAULT,
    }
}

/// Deadline of the template at `index`: `today + 30 + 12 * index` days
pub fn template_deadline(today: NaiveDate, index: usize) -> Deadline {
    let offset = FIRST_DEADLINE_DAYS + DEADLINE_STEP_DAYS * index as u64;
    today
        .checked_add_days(Days::new(offset))
        .map(Deadline::On)
        .unwrap_or(Deadline::Rolling)
}

/// Build the fallback result list for a submission.
///
/// Entries come from the focus area's table (the default table for
/// [`FocusArea::Other`]), at most [`TEMPLATE_LIMIT`] of them, with ids
/// numbered from 1.
pub fn fallback_grants(
    focus_area: FocusArea,
    organization_type: OrganizationType,
    today: NaiveDate,
) -> Vec<GrantMatch> {
    table_for(focus_area)
        .iter()
        .take(TEMPLATE_LIMIT)
        .enumerate()
        .map(|(index, template)| GrantMatch {
            id: index as u32 + 1,
            title: template.title.to_string(),
            funder: template.funder.to_string(),
            description: template
                .description
                .replace(ORG_PLACEHOLDER, organization_type.audience()),
            deadline: template_deadline(today, index),
            amount: template.amount.to_string(),
            url: Some(template.url.to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let a = fallback_grants(FocusArea::Climate, OrganizationType::Nonprofit, today());
        let b = fallback_grants(FocusArea::Climate, OrganizationType::Nonprofit, today());
        assert_eq!(a, b);
    }

    #[test]
    fn test_every_focus_area_yields_at_most_limit() {
        for focus in FocusArea::ALL {
            for org in OrganizationType::ALL {
                let grants = fallback_grants(focus, org, today());
                assert!(!grants.is_empty(), "{focus:?} produced no grants");
                assert!(grants.len() <= TEMPLATE_LIMIT);
            }
        }
    }

    #[test]
    fn test_other_focus_uses_default_table() {
        let grants = fallback_grants(FocusArea::Other, OrganizationType::Startup, today());
        assert_eq!(grants.len(), DEFAULT.len());
        assert_eq!(grants[0].title, DEFAULT[0].title);
    }

    #[test]
    fn test_deadlines_step_by_twelve_days() {
        let grants = fallback_grants(FocusArea::Health, OrganizationType::Research, today());
        let first = grants[0].deadline.date().unwrap();
        let second = grants[1].deadline.date().unwrap();

        assert_eq!(first, NaiveDate::from_ymd_opt(2026, 1, 31).unwrap());
        assert_eq!((second - first).num_days(), 12);
    }

    #[test]
    fn test_descriptions_mention_organization_audience() {
        let grants = fallback_grants(FocusArea::Arts, OrganizationType::Government, today());
        for grant in &grants {
            assert!(
                grant.description.contains("state, local, and tribal governments"),
                "{}",
                grant.description
            );
            assert!(!grant.description.contains(ORG_PLACEHOLDER));
        }
    }

    #[test]
    fn test_ids_are_sequential_from_one() {
        let grants = fallback_grants(FocusArea::Technology, OrganizationType::Other, today());
        let ids: Vec<u32> = grants.iter().map(|g| g.id).collect();
        let expected: Vec<u32> = (1..=grants.len() as u32).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_template_deadline_overflow_is_rolling() {
        assert_eq!(template_deadline(NaiveDate::MAX, 0), Deadline::Rolling);
    }
}
