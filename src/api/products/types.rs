use serde::{de, Deserialize, Deserializer, Serialize};

use inventory_search::models::ProductFilter;

/// Search parameters, from a JSON body or a query string / 搜索参数
///
/// In a JSON body, `null` means the same as a missing key.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchParams {
    /// Text query in the `or` / `+` / `-` syntax
    #[serde(default, deserialize_with = "null_as_default")]
    pub q: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub suppliers: Vec<String>,
    #[serde(default)]
    pub min_height: Option<f64>,
    #[serde(default)]
    pub max_height: Option<f64>,
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subcategories: Vec<String>,
    #[serde(default, deserialize_with = "whole_number")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "whole_number")]
    pub per_page: Option<i64>,
}

/// `null` reads as the type's default / null 视为默认值
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept `2` as well as `2.0`; reject fractions / 页码允许整数值的浮点数
fn whole_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(number) = Option::<serde_json::Number>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if let Some(n) = number.as_i64() {
        return Ok(Some(n));
    }
    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(Some(f as i64)),
        _ => Err(de::Error::custom(format!(
            "expected a whole number, got {number}"
        ))),
    }
}

impl SearchParams {
    /// Parse a raw query string / 解析查询字符串
    ///
    /// `suppliers` and `subcategories` may repeat. Numbers that do not parse
    /// are treated as absent.
    pub fn from_query(raw: Option<&str>) -> Self {
        let mut params = Self::default();
        let Some(raw) = raw else {
            return params;
        };

        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            let value = value.into_owned();
            match key.as_ref() {
                "q" => params.q = value,
                "suppliers" => params.suppliers.push(value),
                "subcategories" => params.subcategories.push(value),
                "category" => params.category = Some(value).filter(|c| !c.trim().is_empty()),
                "min_height" => params.min_height = parse_number(&value),
                "max_height" => params.max_height = parse_number(&value),
                "min_price" => params.min_price = parse_number(&value),
                "max_price" => params.max_price = parse_number(&value),
                "page" => params.page = value.trim().parse().ok(),
                "per_page" => params.per_page = value.trim().parse().ok(),
                _ => {}
            }
        }
        params
    }

    /// Coarse filters for the engine / 转换为筛选条件
    pub fn filter(&self) -> ProductFilter {
        ProductFilter {
            suppliers: self.suppliers.clone(),
            min_height: self.min_height,
            max_height: self.max_height,
            min_price: self.min_price,
            max_price: self.max_price,
            category: self.category.clone(),
            subcategories: self.subcategories.clone(),
        }
    }
}

fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[derive(Debug, Deserialize)]
pub struct SubcategoryQuery {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestionQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct SuppliersResponse {
    pub suppliers: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SubcategoriesResponse {
    pub subcategories: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<String>,
}
