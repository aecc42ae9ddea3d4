use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalculatorInfo {
    pub slug: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub const CALCULATORS: &[CalculatorInfo] = &[
    CalculatorInfo {
        slug: "emi",
        title: "EMI",
        description: "Loan EMI calculator",
    },
    CalculatorInfo {
        slug: "fd",
        title: "FD",
        description: "Fixed Deposit maturity and returns",
    },
    CalculatorInfo {
        slug: "rd",
        title: "RD",
        description: "Recurring Deposit maturity value",
    },
    CalculatorInfo {
        slug: "ssy",
        title: "SSY",
        description: "Sukanya Samriddhi Yojana returns",
    },
    CalculatorInfo {
        slug: "ppf",
        title: "PPF",
        description: "Public Provident Fund returns",
    },
    CalculatorInfo {
        slug: "epf",
        title: "EPF",
        description: "Employee Provident Fund returns",
    },
    CalculatorInfo {
        slug: "sip",
        title: "SIP",
        description: "Systematic Investment Plan growth or required contribution",
    },
    CalculatorInfo {
        slug: "lumpsum",
        title: "Lumpsum",
        description: "One-time investment growth",
    },
    CalculatorInfo {
        slug: "mf",
        title: "Mutual Fund",
        description: "Existing corpus plus monthly SIP",
    },
    CalculatorInfo {
        slug: "swp",
        title: "SWP",
        description: "Systematic Withdrawal Plan depletion",
    },
    CalculatorInfo {
        slug: "nps",
        title: "NPS",
        description: "National Pension System retirement corpus and goal planning",
    },
];

pub fn find(slug: &str) -> Option<&'static CalculatorInfo> {
    CALCULATORS.iter().find(|c| c.slug.eq_ignore_ascii_case(slug))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn slugs_are_unique_and_lowercase() {
        let slugs: HashSet<_> = CALCULATORS.iter().map(|c| c.slug).collect();
        assert_eq!(slugs.len(), CALCULATORS.len());
        assert!(CALCULATORS.iter().all(|c| c.slug == c.slug.to_lowercase()));
    }

    #[test]
    fn find_is_case_insensitive() {
        assert_eq!(find("EMI").map(|c| c.title), Some("EMI"));
        assert!(find("nope").is_none());
    }
}
