//! Concrete record shapes and their rule tables.

use serde::{Deserialize, Serialize};

use crate::filter::Filterable;
use crate::form::{Record, Values};
use crate::gpa::Grade;
use crate::schema::{Choice, FieldSpec, Rule, Schema};

// -----------------------------------------------------------------------------
// Todo items
// -----------------------------------------------------------------------------

/// A single-field todo entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub title: String,
}

impl Record for TodoItem {
    fn from_values(values: &Values) -> Self {
        Self {
            title: values.get("title").to_string(),
        }
    }

    fn field(&self, name: &str) -> Option<String> {
        (name == "title").then(|| self.title.clone())
    }
}

/// Title-only todo: trimmed, must not be blank.
pub fn todo_basic_schema() -> Schema {
    Schema::new(vec![
        FieldSpec::text("title")
            .label("Task")
            .trim(true)
            .rule(Rule::required("Please type a task")),
    ])
}

/// Task categories. Stored as lowercase words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Study,
    Work,
    Home,
    Other,
}

impl Category {
    /// Every category in menu order.
    pub const ALL: [Self; 4] = [Self::Study, Self::Work, Self::Home, Self::Other];

    /// Stored value.
    #[must_use]
    pub const fn value(self) -> &'static str {
        match self {
            Self::Study => "study",
            Self::Work => "work",
            Self::Home => "home",
            Self::Other => "other",
        }
    }

    /// Menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Study => "Study",
            Self::Work => "Work",
            Self::Home => "Chores",
            Self::Other => "Other",
        }
    }
}

fn category_field() -> FieldSpec {
    let mut choices = vec![Choice::new("", "Pick a category")];
    choices.extend(
        Category::ALL
            .iter()
            .map(|c| Choice::new(c.value(), c.label())),
    );
    FieldSpec::choice("category", choices).label("Category")
}

fn category_rule(message: &str) -> Rule {
    Rule::one_of(Category::ALL.iter().map(|c| c.value()), message)
}

/// A todo entry with an optional category and due date.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub due_date: String,
}

impl Record for Task {
    fn from_values(values: &Values) -> Self {
        Self {
            title: values.get("title").to_string(),
            category: values.get("category").to_string(),
            due_date: values.get("dueDate").to_string(),
        }
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "title" => Some(self.title.clone()),
            "category" => Some(self.category.clone()),
            "dueDate" => Some(self.due_date.clone()),
            _ => None,
        }
    }
}

/// Task with plain field checks: trimmed title, category from the menu,
/// date in calendar form.
pub fn task_extended_schema() -> Schema {
    Schema::new(vec![
        FieldSpec::text("title")
            .label("Task")
            .trim(true)
            .rule(Rule::required("Please type a task")),
        category_field().rule(category_rule("Pick a category from the menu")),
        FieldSpec::date("dueDate")
            .label("Due")
            .rule(Rule::date("Dates look like YYYY-MM-DD")),
    ])
}

/// Task managed by form registration only: the title is required, nothing
/// is trimmed, the other fields are taken as given.
pub fn task_managed_schema() -> Schema {
    Schema::new(vec![
        FieldSpec::text("title")
            .label("Task")
            .rule(Rule::required("Please enter a task title")),
        category_field(),
        FieldSpec::date("dueDate").label("Due"),
    ])
}

/// Task validated by a full schema: trimmed title, enumerated category,
/// `YYYY-MM-DD` or empty due date.
pub fn task_validated_schema() -> Schema {
    Schema::new(vec![
        FieldSpec::text("title")
            .label("Task")
            .trim(true)
            .rule(Rule::required("Please enter a task title")),
        category_field().rule(category_rule("Unknown category")),
        FieldSpec::date("dueDate")
            .label("Due")
            .rule(Rule::date("Invalid date format (YYYY-MM-DD)")),
    ])
}

// -----------------------------------------------------------------------------
// Grades
// -----------------------------------------------------------------------------

/// One course and its letter grade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeEntry {
    pub subject: String,
    pub grade: Grade,
}

impl Record for GradeEntry {
    fn from_values(values: &Values) -> Self {
        Self {
            subject: values.get("subject").to_string(),
            grade: values.get("grade").parse().unwrap_or_default(),
        }
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "subject" => Some(self.subject.clone()),
            "grade" => Some(self.grade.label().to_string()),
            _ => None,
        }
    }
}

/// Subject must not be blank; grade must be one of the nine letters.
pub fn grade_schema() -> Schema {
    let choices = Grade::ALL
        .iter()
        .map(|g| Choice::new(g.label(), g.label()))
        .collect();
    Schema::new(vec![
        FieldSpec::text("subject")
            .label("Subject")
            .trim(true)
            .rule(Rule::required("Please enter a subject")),
        FieldSpec::choice("grade", choices)
            .label("Grade")
            .default_value(Grade::A.label())
            .rule(Rule::required("Please choose a grade"))
            .rule(Rule::one_of(
                Grade::ALL.iter().map(|g| g.label()),
                "Please choose a grade",
            )),
    ])
}

// -----------------------------------------------------------------------------
// Directory members
// -----------------------------------------------------------------------------

/// Storage slot for the member directory.
pub const MEMBER_STORAGE_KEY: &str = "mp-records";

/// A member of parliament.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub prefix: String,
    pub first_name: String,
    pub last_name: String,
    pub party: String,
    #[serde(default)]
    pub minister_position: String,
    #[serde(default)]
    pub ministry: String,
    #[serde(default)]
    pub career: String,
    #[serde(default)]
    pub achievements: String,
}

impl Member {
    /// Prefix, first and last name as displayed.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}{} {}", self.prefix, self.first_name, self.last_name)
    }
}

impl Record for Member {
    fn from_values(values: &Values) -> Self {
        Self {
            prefix: values.get("prefix").to_string(),
            first_name: values.get("firstName").to_string(),
            last_name: values.get("lastName").to_string(),
            party: values.get("party").to_string(),
            minister_position: values.get("ministerPosition").to_string(),
            ministry: values.get("ministry").to_string(),
            career: values.get("career").to_string(),
            achievements: values.get("achievements").to_string(),
        }
    }

    fn field(&self, name: &str) -> Option<String> {
        let value = match name {
            "prefix" => &self.prefix,
            "firstName" => &self.first_name,
            "lastName" => &self.last_name,
            "party" => &self.party,
            "ministerPosition" => &self.minister_position,
            "ministry" => &self.ministry,
            "career" => &self.career,
            "achievements" => &self.achievements,
            _ => return None,
        };
        Some(value.clone())
    }
}

impl Filterable for Member {
    fn search_text(&self) -> String {
        format!(
            "{}{} {} {} {} {}",
            self.prefix,
            self.first_name,
            self.last_name,
            self.party,
            self.minister_position,
            self.ministry
        )
    }

    fn category(&self) -> &str {
        &self.party
    }
}

/// Four required name/party fields, four optional detail fields. All trimmed.
pub fn member_schema() -> Schema {
    Schema::new(vec![
        FieldSpec::text("prefix")
            .label("Prefix")
            .trim(true)
            .rule(Rule::required("Please enter a prefix")),
        FieldSpec::text("firstName")
            .label("First name")
            .trim(true)
            .rule(Rule::required("Please enter a first name")),
        FieldSpec::text("lastName")
            .label("Last name")
            .trim(true)
            .rule(Rule::required("Please enter a last name")),
        FieldSpec::text("party")
            .label("Party")
            .trim(true)
            .rule(Rule::required("Please enter a party")),
        FieldSpec::text("ministerPosition")
            .label("Minister position")
            .trim(true),
        FieldSpec::text("ministry").label("Ministry").trim(true),
        FieldSpec::long_text("career").label("Career").trim(true),
        FieldSpec::long_text("achievements")
            .label("Achievements")
            .trim(true),
    ])
}

/// The record used when no directory data is stored.
#[must_use]
pub fn member_seed() -> Vec<Member> {
    vec![Member {
        prefix: "นาย".into(),
        first_name: "อนุทิน".into(),
        last_name: "ชาญวีรกูล".into(),
        party: "ภูมิใจไทย".into(),
        minister_position: "นายกรัฐมนตรี".into(),
        ministry: "ทำเนียบรัฐบาล".into(),
        career: "นักการเมือง นักธุรกิจ อดีตรองนายกรัฐมนตรีและรัฐมนตรีว่าการกระทรวงสาธารณสุข".into(),
        achievements: "ผลักดันนโยบายด้านสาธารณสุขและพัฒนาประเทศหลายด้าน".into(),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormController;
    use crate::store::RecordStore;

    #[test]
    fn test_member_serializes_camel_case() {
        let json = serde_json::to_value(&member_seed()[0]).unwrap();
        assert!(json.get("firstName").is_some());
        assert!(json.get("ministerPosition").is_some());
        assert!(json.get("first_name").is_none());
    }

    #[test]
    fn test_member_optional_fields_default() {
        let json = r#"{"prefix":"Ms","firstName":"A","lastName":"B","party":"P"}"#;
        let member: Member = serde_json::from_str(json).unwrap();
        assert_eq!(member.career, "");
        assert_eq!(member.full_name(), "MsA B");
    }

    #[test]
    fn test_member_schema_fields_match_record() {
        let member = member_seed().remove(0);
        for field in member_schema().fields() {
            assert!(member.field(field.name).is_some(), "{} not readable", field.name);
        }
    }

    #[test]
    fn test_managed_title_stored_untrimmed() {
        let mut form: FormController<Task> = FormController::new(task_managed_schema());
        let mut store = RecordStore::new();
        form.set_value("title", "  read  ");
        assert!(form.submit(&mut store).is_committed());
        assert_eq!(store.records()[0].title, "  read  ");
    }

    #[test]
    fn test_grade_entry_roundtrip_through_form() {
        let mut form: FormController<GradeEntry> = FormController::new(grade_schema());
        let mut store = RecordStore::new();
        form.set_value("subject", "Physics");
        form.set_value("grade", "C+");
        assert!(form.submit(&mut store).is_committed());
        assert_eq!(store.records()[0].grade, Grade::CPlus);
        assert_eq!(form.value("grade"), "A");
    }

    #[test]
    fn test_grade_rejects_unknown_letter() {
        let mut form: FormController<GradeEntry> = FormController::new(grade_schema());
        let mut store = RecordStore::new();
        form.set_value("subject", "Physics");
        form.set_value("grade", "E");
        assert!(!form.submit(&mut store).is_committed());
        assert_eq!(form.error("grade"), Some("Please choose a grade"));
    }
}
