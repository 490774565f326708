use crate::domain::model::{Category, QualificationTier};

pub fn qualify(category: Category) -> QualificationTier {
    match category {
        Category::Languages | Category::Technology => QualificationTier::High,
        Category::Business => QualificationTier::Medium,
        Category::PersonalDevelopment | Category::Other => QualificationTier::Low,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualify_table() {
        assert_eq!(qualify(Category::Languages), QualificationTier::High);
        assert_eq!(qualify(Category::Technology), QualificationTier::High);
        assert_eq!(qualify(Category::Business), QualificationTier::Medium);
        assert_eq!(qualify(Category::PersonalDevelopment), QualificationTier::Low);
        assert_eq!(qualify(Category::Other), QualificationTier::Low);
    }
}
