pub const CATEGORIES: &[&str] = &[
    "Beauty & Personal Care",
    "Health, Household & Baby Care",
    "Clothing, Shoes & Jewelry",
    "Women's Fashion",
    "Men's Fashion",
    "Kids' & Baby Fashion",
    "Luxury Stores",
    "Electronics & Tech",
    "Cell Phones & Accessories",
    "Computers & Tablets",
    "Home & Kitchen",
    "Pet Supplies",
    "Garden & Outdoor",
    "Appliances",
    "Tools & Home Improvement",
    "Automotive Parts",
    "Grocery & Gourmet Food",
    "Sports & Outdoors",
    "Musical Instruments",
    "Office Products",
    "Toys & Games",
    "Arts, Crafts & Sewing",
    "Books & Media",
    "Collectibles & Fine Art",
    "Handmade Products",
    "Luggage & Travel Gear",
    "Industrial & Scientific",
];

pub fn default_category() -> &'static str {
    CATEGORIES[0]
}

pub fn is_known_category(category: &str) -> bool {
    CATEGORIES.contains(&category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_has_expected_size_and_default() {
        assert_eq!(CATEGORIES.len(), 27);
        assert_eq!(default_category(), "Beauty & Personal Care");
    }

    #[test]
    fn membership_is_exact() {
        assert!(is_known_category("Pet Supplies"));
        assert!(!is_known_category("pet supplies"));
    }
}
