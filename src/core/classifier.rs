use crate::domain::model::Category;

/// 關鍵字表，順序即優先順序，第一個命中的分類勝出
const KEYWORD_TABLE: [(Category, &[&str]); 4] = [
    (
        Category::Languages,
        &[
            "inglés",
            "español",
            "francés",
            "alemán",
            "portugués",
            "chino",
            "idioma",
            "lengua",
        ],
    ),
    (
        Category::Technology,
        &[
            "programación",
            "python",
            "java",
            "web",
            "desarrollo",
            "software",
            "tecnología",
            "computación",
        ],
    ),
    (
        Category::Business,
        &[
            "administración",
            "contabilidad",
            "marketing",
            "ventas",
            "negocio",
            "emprendimiento",
        ],
    ),
    (
        Category::PersonalDevelopment,
        &[
            "liderazgo",
            "comunicación",
            "coaching",
            "desarrollo personal",
            "habilidades",
        ],
    ),
];

/// 將自由文字分類。沒有任何關鍵字時回傳 `Category::Other`。
///
/// 比對是小寫後的子字串比對；重疊的關鍵字只看分類優先順序，
/// 不看命中長度或位置（"desarrollo personal" 會先被 Technology 的 "desarrollo" 吃掉）。
pub fn classify(text: &str) -> Category {
    let normalized = text.to_lowercase();

    KEYWORD_TABLE
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| normalized.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Other)
}
