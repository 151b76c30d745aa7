//! Employee listing page

use super::{escape, layout};
use roster_core::Employee;
use std::fmt::Write;

/// One-shot notice carried in the `flash` query parameter after a redirect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    Hired,
    Updated,
    Fired,
    FireFailed,
}

impl Flash {
    /// Unknown values are ignored rather than rejected.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "hired" => Some(Flash::Hired),
            "updated" => Some(Flash::Updated),
            "fired" => Some(Flash::Fired),
            "fire_failed" => Some(Flash::FireFailed),
            _ => None,
        }
    }

    pub fn as_param(self) -> &'static str {
        match self {
            Flash::Hired => "hired",
            Flash::Updated => "updated",
            Flash::Fired => "fired",
            Flash::FireFailed => "fire_failed",
        }
    }

    /// Listing URL showing this notice
    pub fn redirect_target(self) -> String {
        format!("/?flash={}", self.as_param())
    }

    fn message(self) -> (&'static str, &'static str) {
        match self {
            Flash::Hired => ("success", "Employee hired successfully!"),
            Flash::Updated => ("success", "Employee details updated!"),
            Flash::Fired => ("warning", "Employee record removed."),
            Flash::FireFailed => ("error", "Error deleting employee, please try again."),
        }
    }
}

pub struct ListingPage<'a> {
    pub employees: &'a [Employee],
    pub query: Option<&'a str>,
    pub flash: Option<Flash>,
}

impl ListingPage<'_> {
    pub fn render(&self) -> String {
        let mut body = String::new();

        if let Some(flash) = self.flash {
            let (class, text) = flash.message();
            let _ = writeln!(body, "<p class=\"flash {}\">{}</p>", class, text);
        }

        let _ = writeln!(
            body,
            "<h1>Employees</h1>\n\
             <form method=\"get\" action=\"/\">\n\
             <input type=\"search\" name=\"q\" placeholder=\"Search by ID or email\" value=\"{}\">\n\
             <button type=\"submit\">Search</button>\n\
             </form>\n\
             <p><a href=\"/hire\">Hire employee</a></p>",
            escape(self.query.unwrap_or(""))
        );

        if self.employees.is_empty() {
            body.push_str("<p>No employees found.</p>\n");
            return layout("Employees", &body);
        }

        body.push_str(
            "<table>\n<thead><tr><th>ID</th><th>Name</th><th>Email</th><th>Department</th>\
             <th>Salary</th><th>Hire date</th><th></th></tr></thead>\n<tbody>\n",
        );
        for employee in self.employees {
            let _ = writeln!(
                body,
                "<tr><td>{id}</td><td>{name}</td><td>{email}</td><td>{department}</td>\
                 <td>{salary}</td><td>{hire_date}</td>\
                 <td><a href=\"/edit/{id}\">Edit</a> \
                 <form class=\"inline\" method=\"post\" action=\"/fire/{id}\">\
                 <button type=\"submit\">Fire</button></form></td></tr>",
                id = employee.id,
                name = escape(&employee.full_name()),
                email = escape(&employee.email),
                department = escape(employee.department.label()),
                salary = employee.salary,
                hire_date = employee.hire_date,
            );
        }
        body.push_str("</tbody>\n</table>\n");

        layout("Employees", &body)
    }
}
