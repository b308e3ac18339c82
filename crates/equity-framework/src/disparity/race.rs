/// Collapses separate Hispanic-origin and race fields into one category.
/// Hispanic ethnicity takes precedence over race; NH = non-Hispanic.
pub fn standardize_race_ethnicity(hispanic_origin: &str, race: &str) -> &'static str {
    if hispanic_origin.contains("Hispanic") && !hispanic_origin.contains("Not") {
        return "Hispanic or Latino";
    }

    if race.contains("Black") {
        "Black (NH)"
    } else if race.contains("White") {
        "White (NH)"
    } else if race.contains("Asian") {
        "Asian/PI (NH)"
    } else if race.contains("Indian") || race.contains("Alaska") {
        "AIAN (NH)"
    } else if race.contains("Hawaiian") || race.contains("Pacific") {
        "Asian/PI (NH)"
    } else if race.contains("More than one") {
        "Multiracial (NH)"
    } else {
        "Other/Unknown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hispanic_origin_takes_precedence() {
        assert_eq!(
            standardize_race_ethnicity("Hispanic or Latino", "Black or African American"),
            "Hispanic or Latino"
        );
        assert_eq!(
            standardize_race_ethnicity("Not Hispanic or Latino", "Black or African American"),
            "Black (NH)"
        );
    }

    #[test]
    fn race_keywords_map_to_categories() {
        let cases = [
            ("White", "White (NH)"),
            ("Asian", "Asian/PI (NH)"),
            ("American Indian or Alaska Native", "AIAN (NH)"),
            ("Native Hawaiian or Other Pacific Islander", "Asian/PI (NH)"),
            ("More than one race", "Multiracial (NH)"),
            ("Unknown or Not Stated", "Other/Unknown"),
        ];
        for (race, expected) in cases {
            assert_eq!(
                standardize_race_ethnicity("Not Hispanic or Latino", race),
                expected,
                "{race}"
            );
        }
    }

    #[test]
    fn blank_fields_fall_through_to_other() {
        assert_eq!(standardize_race_ethnicity("", ""), "Other/Unknown");
    }
}
