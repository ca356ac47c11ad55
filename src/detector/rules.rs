//! Built-in detection rules
//!
//! Four rule kinds cover the detection matrix: regex rules fire on sampled
//! values, name rules on normalized column names, multi-name rules on column
//! combinations, and token rules on individual words inside values.
//!
//! Column-name aliases are stored lowercased with underscores removed, which
//! lets a single list cover both `under_score` and `camelCase` columns. There
//! are no name rules for emails or IPs since those are detected from values.

use crate::domain::Confidence;
use regex::Regex;
use std::collections::HashSet;

/// A rule that fires when a value matches a regular expression
#[derive(Debug, Clone)]
pub struct RegexRule {
    pub name: &'static str,
    pub display_name: &'static str,
    pub regex: Regex,
    /// Fixed confidence overriding the matched-fraction heuristic
    pub confidence: Option<Confidence>,
}

/// A rule that fires when a normalized column name matches an alias
#[derive(Debug, Clone)]
pub struct NameRule {
    pub name: &'static str,
    pub display_name: &'static str,
    pub column_names: &'static [&'static str],
}

/// A rule that fires only when one column matches each alias set, in order
#[derive(Debug, Clone)]
pub struct MultiNameRule {
    pub name: &'static str,
    pub display_name: &'static str,
    pub column_names: &'static [&'static [&'static str]],
}

/// A rule that fires when any token of a value is in its token set
#[derive(Debug, Clone)]
pub struct TokenRule {
    pub name: &'static str,
    pub display_name: &'static str,
    pub tokens: HashSet<&'static str>,
}

pub(crate) fn builtin_name_rules() -> Vec<NameRule> {
    vec![
        NameRule {
            name: "surname",
            display_name: "last names",
            column_names: &["lastname", "lname", "surname"],
        },
        NameRule {
            name: "phone",
            display_name: "phone numbers",
            column_names: &["phone", "phonenumber"],
        },
        NameRule {
            name: "date_of_birth",
            display_name: "dates of birth",
            column_names: &["dateofbirth", "birthday", "dob"],
        },
        NameRule {
            name: "postal_code",
            display_name: "postal codes",
            column_names: &["zip", "zipcode", "postalcode"],
        },
        NameRule {
            name: "oauth_token",
            display_name: "OAuth tokens",
            column_names: &["accesstoken", "refreshtoken"],
        },
    ]
}

pub(crate) fn builtin_multi_name_rules() -> Vec<MultiNameRule> {
    vec![MultiNameRule {
        name: "location",
        display_name: "location data",
        column_names: &[&["latitude", "lat"], &["longitude", "lon", "lng"]],
    }]
}

// TODO IPv6
pub(crate) fn builtin_regex_rules() -> Vec<RegexRule> {
    let rule = |name, display_name, pattern: &str| RegexRule {
        name,
        display_name,
        regex: Regex::new(pattern).expect("built-in pattern is hardcoded and valid"),
        confidence: None,
    };

    vec![
        rule(
            "email",
            "emails",
            r"\b[\w][\w+.-]+(@|%40)[a-z\d-]+(\.[a-z\d-]+)*\.[a-z]+\b",
        ),
        rule("ip", "IP addresses", r"\b\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}\b"),
        rule(
            "credit_card",
            "credit card numbers",
            r"(\b[3456]\d{3}[\s+-]\d{4}[\s+-]\d{4}[\s+-]\d{4}\b)|(\b[3456]\d{15}\b)",
        ),
        rule(
            "phone",
            "phone numbers",
            r"(\b(\+\d{1,2}\s)?\(?\d{3}\)?[\s+.-]\d{3}[\s+.-]\d{4}\b)|((?:\+|%2B)[1-9]\d{6,14}\b)",
        ),
        rule("ssn", "SSNs", r"\b\d{3}[\s+-]\d{2}[\s+-]\d{4}\b"),
        rule(
            "street",
            "street addresses",
            r"(?i)\b\d+\b.{4,60}\b(st|street|ave|avenue|road|rd|drive|dr)\b",
        ),
        // google
        rule("oauth_token", "OAuth tokens", r"ya29\..{60,200}"),
        rule(
            "mac",
            "MAC addresses",
            r"\b[0-9a-fA-F]{2}(?:(?::|%3A)[0-9a-fA-F]{2}){5}\b",
        ),
    ]
}

pub(crate) fn builtin_token_rules() -> Vec<TokenRule> {
    vec![TokenRule {
        name: "surname",
        display_name: "last names",
        tokens: SURNAMES.iter().copied().collect(),
    }]
}

// First 300 from the 2010 US Census
// https://www.census.gov/topics/population/genealogy/data/2010_surnames.html
// The first 300 covered ~30% cumulative density in the 1990 US Census.
const SURNAMES: &[&str] = &[
    "smith", "johnson", "williams", "brown", "jones", "garcia", "miller", "davis", "rodriguez",
    "martinez", "hernandez", "lopez", "gonzalez", "wilson", "anderson", "thomas", "taylor",
    "moore", "jackson", "martin", "lee", "perez", "thompson", "white", "harris", "sanchez",
    "clark", "ramirez", "lewis", "robinson", "walker", "young", "allen", "king", "wright",
    "scott", "torres", "nguyen", "hill", "flores", "green", "adams", "nelson", "baker", "hall",
    "rivera", "campbell", "mitchell", "carter", "roberts", "gomez", "phillips", "evans", "turner",
    "diaz", "parker", "cruz", "edwards", "collins", "reyes", "stewart", "morris", "morales",
    "murphy", "cook", "rogers", "gutierrez", "ortiz", "morgan", "cooper", "peterson", "bailey",
    "reed", "kelly", "howard", "ramos", "kim", "cox", "ward", "richardson", "watson", "brooks",
    "chavez", "wood", "james", "bennett", "gray", "mendoza", "ruiz", "hughes", "price", "alvarez",
    "castillo", "sanders", "patel", "myers", "long", "ross", "foster", "jimenez", "powell",
    "jenkins", "perry", "russell", "sullivan", "bell", "coleman", "butler", "henderson", "barnes",
    "gonzales", "fisher", "vasquez", "simmons", "romero", "jordan", "patterson", "alexander",
    "hamilton", "graham", "reynolds", "griffin", "wallace", "moreno", "west", "cole", "hayes",
    "bryant", "herrera", "gibson", "ellis", "tran", "medina", "aguilar", "stevens", "murray",
    "ford", "castro", "marshall", "owens", "harrison", "fernandez", "mcdonald", "woods",
    "washington", "kennedy", "wells", "vargas", "henry", "chen", "freeman", "webb", "tucker",
    "guzman", "burns", "crawford", "olson", "simpson", "porter", "hunter", "gordon", "mendez",
    "silva", "shaw", "snyder", "mason", "dixon", "munoz", "hunt", "hicks", "holmes", "palmer",
    "wagner", "black", "robertson", "boyd", "rose", "stone", "salazar", "fox", "warren", "mills",
    "meyer", "rice", "schmidt", "garza", "daniels", "ferguson", "nichols", "stephens", "soto",
    "weaver", "ryan", "gardner", "payne", "grant", "dunn", "kelley", "spencer", "hawkins",
    "arnold", "pierce", "vazquez", "hansen", "peters", "santos", "hart", "bradley", "knight",
    "elliott", "cunningham", "duncan", "armstrong", "hudson", "carroll", "lane", "riley",
    "andrews", "alvarado", "ray", "delgado", "berry", "perkins", "hoffman", "johnston",
    "matthews", "pena", "richards", "contreras", "willis", "carpenter", "lawrence", "sandoval",
    "guerrero", "george", "chapman", "rios", "estrada", "ortega", "watkins", "greene", "nunez",
    "wheeler", "valdez", "harper", "burke", "larson", "santiago", "maldonado", "morrison",
    "franklin", "carlson", "austin", "dominguez", "carr", "lawson", "jacobs", "obrien", "lynch",
    "singh", "vega", "bishop", "montgomery", "oliver", "jensen", "harvey", "williamson",
    "gilbert", "dean", "sims", "espinoza", "howell", "li", "wong", "reid", "hanson", "le",
    "mccoy", "garrett", "burton", "fuller", "wang", "weber", "welch", "rojas", "lucas",
    "marquez", "fields", "park", "yang", "little", "banks", "padilla", "day", "walsh", "bowman",
    "schultz", "luna", "fowler", "mejia",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_rules_compile() {
        assert_eq!(builtin_regex_rules().len(), 8);
        assert_eq!(builtin_name_rules().len(), 5);
        assert_eq!(builtin_multi_name_rules().len(), 1);
        assert_eq!(builtin_token_rules().len(), 1);
    }

    #[test]
    fn test_email_rule_matches() {
        let rules = builtin_regex_rules();
        let email = rules.iter().find(|r| r.name == "email").unwrap();
        assert!(email.regex.is_match("test@example.org"));
        assert!(!email.regex.is_match("not-an-email"));
    }

    #[test]
    fn test_surname_token_set() {
        let rules = builtin_token_rules();
        assert_eq!(rules[0].tokens.len(), 300);
        assert!(rules[0].tokens.contains("smith"));
        assert!(!rules[0].tokens.contains("zzyzx"));
    }
}
