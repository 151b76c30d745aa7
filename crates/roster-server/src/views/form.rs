//! Hire / edit form page

use super::{escape, layout};
use roster_core::{Department, EmployeeInput, RosterError};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Hire,
    Edit(i32),
}

impl FormAction {
    fn title(self) -> &'static str {
        match self {
            FormAction::Hire => "Hire",
            FormAction::Edit(_) => "Update",
        }
    }

    fn target(self) -> String {
        match self {
            FormAction::Hire => "/hire".to_string(),
            FormAction::Edit(id) => format!("/edit/{}", id),
        }
    }
}

pub struct FormPage<'a> {
    pub action: FormAction,
    pub input: &'a EmployeeInput,
    pub error: Option<&'a RosterError>,
}

impl FormPage<'_> {
    pub fn render(&self) -> String {
        let title = format!("{} Employee", self.action.title());
        let mut body = String::new();

        let _ = writeln!(body, "<h1>{}</h1>", escape(&title));

        if let Some(error) = self.error {
            let verb = match self.action {
                FormAction::Hire => "hiring employee",
                FormAction::Edit(_) => "updating",
            };
            let _ = writeln!(
                body,
                "<p class=\"flash error\">Error {}: {}</p>",
                verb,
                escape(&error.to_string())
            );
        }

        let _ = writeln!(
            body,
            "<form method=\"post\" action=\"{}\">",
            self.action.target()
        );
        text_field(&mut body, "first_name", "First name", "text", &self.input.first_name);
        text_field(&mut body, "last_name", "Last name", "text", &self.input.last_name);
        text_field(&mut body, "email", "Email", "email", &self.input.email);

        body.push_str("<label for=\"department\">Department</label>\n<select id=\"department\" name=\"department\" required>\n");
        for department in Department::ALL {
            let selected = if self.input.department == department.code() {
                " selected"
            } else {
                ""
            };
            let _ = writeln!(
                body,
                "<option value=\"{}\"{}>{}</option>",
                department.code(),
                selected,
                escape(department.label())
            );
        }
        body.push_str("</select>\n");

        text_field(&mut body, "salary", "Salary", "number", &self.input.salary);
        text_field(&mut body, "hire_date", "Hire date", "date", &self.input.hire_date);

        let _ = writeln!(
            body,
            "<p><button type=\"submit\">{}</button> <a href=\"/\">Cancel</a></p>\n</form>",
            self.action.title()
        );

        layout(&title, &body)
    }
}

fn text_field(body: &mut String, name: &str, label: &str, kind: &str, value: &str) {
    let extra = if kind == "number" { " min=\"0\" step=\"any\"" } else { "" };
    let _ = writeln!(
        body,
        "<label for=\"{name}\">{label}</label>\n\
         <input id=\"{name}\" name=\"{name}\" type=\"{kind}\"{extra} value=\"{value}\">",
        value = escape(value),
    );
}
