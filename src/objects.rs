#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Result records as the portal's results API returns them.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::constants::NO_GRADE_GRAPHIC_TYPE;

/// Score shown for a result: either a number or a free-form label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GraphicValue {
    /// Numeric score, kept as the exact JSON number.
    Number(Number),
    /// Textual score (e.g. a letter grade).
    Text(String),
}

impl GraphicValue {
    /// Returns the score as a float when it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            GraphicValue::Number(n) => n.as_f64(),
            GraphicValue::Text(_) => None,
        }
    }
}

impl Display for GraphicValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphicValue::Number(n) => write!(f, "{n}"),
            GraphicValue::Text(s) => write!(f, "{s}"),
        }
    }
}

/// How a result's score is represented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultGraphic {
    /// Representation kind, e.g. `"percentage"` or `"value"`.
    #[serde(rename = "type")]
    pub kind:        String,
    /// Display color suggested by the portal.
    #[serde(default)]
    pub color:       Option<String>,
    /// The score itself.
    pub value:       GraphicValue,
    /// Human-readable score, e.g. `"7/10"`.
    #[serde(default)]
    pub description: Option<String>,
}

impl ResultGraphic {
    /// Returns true when the score is a percentage.
    pub fn is_percentage(&self) -> bool {
        self.kind == NO_GRADE_GRAPHIC_TYPE
    }
}

/// Subject grouping a result belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Portal identifier.
    #[serde(default)]
    pub id:           Option<i64>,
    /// Display name.
    #[serde(default)]
    pub name:         String,
    /// Short label.
    #[serde(default)]
    pub abbreviation: String,
}

/// Teacher who owns the gradebook entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    /// Portal identifier.
    #[serde(default)]
    pub id:        Option<Value>,
    /// Name in the portal's first-name/last-name orderings, kept as-is.
    #[serde(default)]
    pub name:      Option<Value>,
    /// Sort key of the name.
    #[serde(default)]
    pub sort:      Option<String>,
    /// Avatar URL.
    #[serde(default)]
    pub pic_url:   Option<String>,
    /// Portal user type.
    #[serde(default)]
    pub user_type: Option<String>,
}

/// Course a result was given in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Portal identifier.
    #[serde(default)]
    pub id:        Option<i64>,
    /// Course name.
    #[serde(default)]
    pub name:      String,
    /// Icon or color shown for the course, kept as-is.
    #[serde(default)]
    pub graphic:   Option<Value>,
    /// Teachers of the course.
    #[serde(default)]
    pub teachers:  Vec<Teacher>,
    /// Parent course identifier.
    #[serde(default)]
    pub parent_id: Option<i64>,
}

/// Reporting period a result counts towards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    /// Portal identifier.
    #[serde(default)]
    pub id:        Option<i64>,
    /// Period name, e.g. `"Trimester 1"`.
    #[serde(default)]
    pub name:      String,
    /// Icon shown for the period.
    #[serde(default)]
    pub icon:      Option<String>,
    /// Whether the period is the current one.
    #[serde(default)]
    pub is_active: Option<bool>,
    /// Class the period was defined for, kept as-is.
    #[serde(default)]
    pub class:     Option<Value>,
}

/// Listing view of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultWithoutDetails {
    /// Opaque identifier, used to fetch the details.
    pub identifier:          String,
    /// Evaluation type, usually `"normal"`.
    #[serde(rename = "type", default)]
    pub kind:                String,
    /// Title of the evaluation.
    #[serde(default)]
    pub name:                String,
    /// Score and its representation.
    pub graphic:             ResultGraphic,
    /// Date of the evaluation, as sent by the portal.
    #[serde(default)]
    pub date:                String,
    /// Teacher owning the gradebook entry.
    #[serde(default)]
    pub gradebook_owner:     Option<Teacher>,
    /// Subject grouping; carried forward from the previous result when the
    /// portal leaves it out.
    #[serde(default)]
    pub component:           Option<Component>,
    /// Courses the evaluation belongs to.
    #[serde(default)]
    pub courses:             Vec<Course>,
    /// Reporting period.
    #[serde(default)]
    pub period:              Option<Period>,
    /// Structured feedback entries.
    #[serde(default)]
    pub feedback:            Vec<Value>,
    /// Plain-text feedback.
    #[serde(default)]
    pub feedbacks:           Vec<String>,
    /// Whether the result is visible to the student.
    #[serde(default)]
    pub availability_status: Option<bool>,
    /// Whether the result has been published.
    #[serde(default)]
    pub is_published:        Option<bool>,
    /// Whether the result counts towards the period total.
    #[serde(default)]
    pub does_count:          Option<bool>,
    /// Whether the result was deleted.
    #[serde(default)]
    pub deleted:             Option<bool>,
}

impl ResultWithoutDetails {
    /// Returns the names of all courses, joined with `", "`.
    pub fn course_names(&self) -> String {
        self.courses
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Returns the component name, or an empty string.
    pub fn component_name(&self) -> &str {
        self.component.as_ref().map(|c| c.name.as_str()).unwrap_or("")
    }
}

/// Full record of one evaluation, as returned by the detail endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultWithDetails {
    /// Every field of the listing view.
    #[serde(flatten)]
    pub summary: ResultWithoutDetails,
    /// Detail-only fields (class averages, central tendencies, ...), kept
    /// as-is.
    #[serde(default)]
    pub details: Map<String, Value>,
}

impl std::ops::Deref for ResultWithDetails {
    type Target = ResultWithoutDetails;

    fn deref(&self) -> &Self::Target {
        &self.summary
    }
}
