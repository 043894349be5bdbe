/// Domain indicators derived from a free-text category label.
///
/// Flags are independent of each other; a label may raise several.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryFlags {
    pub is_fashion: bool,
    pub is_tech: bool,
    pub is_home: bool,
    pub is_luxury: bool,
    pub is_small: bool,
    pub is_pet: bool,
}

const FASHION_KEYWORDS: &[&str] = &["Fashion", "Clothing", "Jewelry"];
const TECH_KEYWORDS: &[&str] = &["Electronics", "Computers", "Phones"];
const HOME_KEYWORDS: &[&str] = &["Home", "Appliances", "Garden"];
const LUXURY_KEYWORDS: &[&str] = &["Luxury", "Jewelry", "Fine Art"];
const SMALL_KEYWORDS: &[&str] = &["Beauty", "Jewelry", "Grocery"];
const PET_KEYWORDS: &[&str] = &["Pet"];

fn contains_any(category: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| category.contains(keyword))
}

/// Case-sensitive substring match against the fixed keyword sets.
/// Unmatched labels yield all-false flags.
pub fn classify(category: &str) -> CategoryFlags {
    CategoryFlags {
        is_fashion: contains_any(category, FASHION_KEYWORDS),
        is_tech: contains_any(category, TECH_KEYWORDS),
        is_home: contains_any(category, HOME_KEYWORDS),
        is_luxury: contains_any(category, LUXURY_KEYWORDS),
        is_small: contains_any(category, SMALL_KEYWORDS),
        is_pet: contains_any(category, PET_KEYWORDS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jewelry_boutique_raises_luxury_fashion_and_small() {
        let flags = classify("Luxury Jewelry Boutique");
        assert_eq!(
            flags,
            CategoryFlags {
                is_fashion: true,
                is_tech: false,
                is_home: false,
                is_luxury: true,
                is_small: true,
                is_pet: false,
            }
        );
    }

    #[test]
    fn unrecognized_label_has_no_flags() {
        assert_eq!(classify("Miscellaneous Widgets"), CategoryFlags::default());
        assert_eq!(classify(""), CategoryFlags::default());
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(classify("pet supplies"), CategoryFlags::default());
        assert!(classify("Pet Supplies").is_pet);
    }

    #[test]
    fn home_keyword_matches_inside_longer_labels() {
        let flags = classify("Tools & Home Improvement");
        assert!(flags.is_home);
        assert!(!flags.is_tech);
    }

    #[test]
    fn tech_labels_from_catalogue() {
        assert!(classify("Cell Phones & Accessories").is_tech);
        assert!(classify("Computers & Tablets").is_tech);
        assert!(classify("Electronics & Tech").is_tech);
    }
}
