//! Schema descriptor: the structured block each mode asks the model for.
//!
//! The descriptor is data, not text. It renders into the JSON skeleton that
//! goes into the prompt and also lists the exact key paths it requires.

use crate::domain::swot::{SwotCategory, SPECIFIC_BRANCH};

use super::AnalysisRequest;

/// Placeholder rendered for every SWOT score.
pub const SCORE_PLACEHOLDER: &str = "<integer 1-10>";

/// Shape of one field in the skeleton.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldShape {
    /// A string field with an example value.
    Text(String),
    /// An integer score in the 1-10 range.
    Score,
    /// A numeric field rendered as an unquoted placeholder.
    Number(&'static str),
    /// A list of strings with example items.
    TextList(Vec<String>),
    /// A nested object.
    Object(Vec<SchemaField>),
    /// A list of objects, rendered with one example element.
    ObjectList(Vec<SchemaField>),
}

/// A named field in the skeleton.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaField {
    pub key: &'static str,
    pub shape: FieldShape,
}

impl SchemaField {
    fn new(key: &'static str, shape: FieldShape) -> Self {
        Self { key, shape }
    }
}

/// The structured block contract for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDescriptor {
    fields: Vec<SchemaField>,
}

impl SchemaDescriptor {
    /// Builds the descriptor for a request.
    ///
    /// `with_tables` adds the price and discount comparison tables to the
    /// comparison schemas; it is set when context data was supplied.
    pub fn for_request(request: &AnalysisRequest, with_tables: bool) -> Self {
        let fields = match request {
            AnalysisRequest::Single { shop } => vec![
                SchemaField::new("shop_name", text(shop.name())),
                scores(),
                summary(""),
            ],
            AnalysisRequest::Branch { branch } => vec![
                SchemaField::new("brand_name", text(branch.name())),
                SchemaField::new(
                    "branch_location",
                    text(branch.location_qualifier().unwrap_or_default()),
                ),
                SchemaField::new("analysis_type", text(SPECIFIC_BRANCH)),
                scores(),
                SchemaField::new(
                    "location_analysis",
                    FieldShape::Object(vec![
                        SchemaField::new("area_characteristics", text("Characteristics of the area")),
                        SchemaField::new("target_customers", text("Target customers at this location")),
                        SchemaField::new(
                            "nearby_competitors",
                            examples("competitor", 3),
                        ),
                        SchemaField::new("traffic_level", text("Low | Medium | High")),
                    ]),
                ),
                summary("branch "),
                SchemaField::new("local_strategies", examples("local strategy", 3)),
            ],
            AnalysisRequest::Pairwise { my_shop, competitor } => {
                let mut fields = vec![
                    shop_block("my_shop", my_shop.name()),
                    shop_block("competitor", competitor.name()),
                ];
                fields.extend(comparison_lists());
                if with_tables {
                    fields.extend(comparison_tables());
                }
                fields
            }
            AnalysisRequest::AutoDetect => {
                let mut fields = vec![
                    SchemaField::new(
                        "detected_shops",
                        FieldShape::TextList(vec![
                            "first shop found in the data".to_string(),
                            "second shop found in the data".to_string(),
                        ]),
                    ),
                    shop_block("my_shop", "first detected shop"),
                    shop_block("competitor", "second detected shop"),
                ];
                fields.extend(comparison_lists());
                fields.extend(comparison_tables());
                fields
            }
            AnalysisRequest::Multi { my_shop, .. } => vec![
                shop_block("my_shop", my_shop.name()),
                SchemaField::new("competitors", FieldShape::ObjectList(shop_fields("competitor name"))),
                SchemaField::new(
                    "ranking",
                    FieldShape::ObjectList(vec![
                        SchemaField::new("rank", FieldShape::Number("<integer, 1 = best>")),
                        SchemaField::new("name", text("shop name")),
                        SchemaField::new("total_score", FieldShape::Number("<number>")),
                        SchemaField::new("note", text("short reason")),
                    ]),
                ),
                SchemaField::new("strategies", examples("strategy", 3)),
            ],
        };

        Self { fields }
    }

    pub fn fields(&self) -> &[SchemaField] {
        &self.fields
    }

    /// Dotted paths of every key in the skeleton, in render order.
    ///
    /// Object lists contribute their element keys as `list[].key`.
    pub fn key_paths(&self) -> Vec<String> {
        let mut out = Vec::new();
        collect_paths(&self.fields, "", &mut out);
        out
    }

    /// Renders the skeleton as indented JSON-like text.
    pub fn render(&self) -> String {
        let mut out = String::new();
        render_object(&self.fields, 0, &mut out);
        out
    }
}

fn text(example: &str) -> FieldShape {
    FieldShape::Text(example.to_string())
}

fn examples(label: &str, count: usize) -> FieldShape {
    FieldShape::TextList((1..=count).map(|i| format!("{} {}", label, i)).collect())
}

fn scores() -> SchemaField {
    SchemaField::new(
        "scores",
        FieldShape::Object(
            SwotCategory::all()
                .iter()
                .map(|c| SchemaField::new(c.key(), FieldShape::Score))
                .collect(),
        ),
    )
}

fn summary(qualifier: &str) -> SchemaField {
    let item = |c: &SwotCategory| {
        let singular = match c {
            SwotCategory::Strengths => "strength",
            SwotCategory::Weaknesses => "weakness",
            SwotCategory::Opportunities => "opportunity",
            SwotCategory::Threats => "threat",
        };
        SchemaField::new(c.key(), examples(&format!("{}{}", qualifier, singular), 3))
    };
    SchemaField::new(
        "summary",
        FieldShape::Object(SwotCategory::all().iter().map(item).collect()),
    )
}

fn shop_fields(name: &str) -> Vec<SchemaField> {
    vec![SchemaField::new("name", text(name)), scores(), summary("")]
}

fn shop_block(key: &'static str, name: &str) -> SchemaField {
    SchemaField::new(key, FieldShape::Object(shop_fields(name)))
}

fn comparison_lists() -> Vec<SchemaField> {
    vec![
        SchemaField::new("competitive_advantages", examples("advantage", 3)),
        SchemaField::new("areas_to_improve", examples("area to improve", 3)),
        SchemaField::new("strategies", examples("strategy", 3)),
    ]
}

fn comparison_tables() -> Vec<SchemaField> {
    vec![
        SchemaField::new(
            "price_comparison",
            FieldShape::ObjectList(vec![
                SchemaField::new("product", text("product name")),
                SchemaField::new("price_a", FieldShape::Number("<my shop price>")),
                SchemaField::new("price_b", FieldShape::Number("<competitor price>")),
                SchemaField::new("difference", FieldShape::Number("<price_a - price_b>")),
                SchemaField::new("note", text("short remark")),
            ]),
        ),
        SchemaField::new(
            "discount_comparison",
            FieldShape::ObjectList(vec![
                SchemaField::new("program", text("promotion or discount program")),
                SchemaField::new("shop_a", text("what my shop offers")),
                SchemaField::new("shop_b", text("what the competitor offers")),
                SchemaField::new("note", text("short remark")),
            ]),
        ),
    ]
}

fn collect_paths(fields: &[SchemaField], prefix: &str, out: &mut Vec<String>) {
    for field in fields {
        let path = format!("{}{}", prefix, field.key);
        out.push(path.clone());
        match &field.shape {
            FieldShape::Object(children) => collect_paths(children, &format!("{}.", path), out),
            FieldShape::ObjectList(children) => {
                collect_paths(children, &format!("{}[].", path), out)
            }
            _ => {}
        }
    }
}

fn indent(level: usize) -> String {
    "    ".repeat(level)
}

fn quoted(s: &str) -> String {
    // serde_json escaping keeps names with quotes or backslashes valid.
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{}\"", s))
}

fn render_object(fields: &[SchemaField], level: usize, out: &mut String) {
    out.push_str("{\n");
    for (i, field) in fields.iter().enumerate() {
        out.push_str(&indent(level + 1));
        out.push_str(&quoted(field.key));
        out.push_str(": ");
        render_shape(&field.shape, level + 1, out);
        if i + 1 < fields.len() {
            out.push(',');
        }
        out.push('\n');
    }
    out.push_str(&indent(level));
    out.push('}');
}

fn render_shape(shape: &FieldShape, level: usize, out: &mut String) {
    match shape {
        FieldShape::Text(example) => out.push_str(&quoted(example)),
        FieldShape::Score => out.push_str(SCORE_PLACEHOLDER),
        FieldShape::Number(placeholder) => out.push_str(placeholder),
        FieldShape::TextList(items) => {
            let items: Vec<String> = items.iter().map(|s| quoted(s)).collect();
            out.push('[');
            out.push_str(&items.join(", "));
            out.push(']');
        }
        FieldShape::Object(children) => render_object(children, level, out),
        FieldShape::ObjectList(children) => {
            out.push_str("[\n");
            out.push_str(&indent(level + 1));
            render_object(children, level + 1, out);
            out.push('\n');
            out.push_str(&indent(level));
            out.push(']');
        }
    }
}
