//! Static sample records for the showcase and the story catalog.

use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

use crate::ui::{Column, FieldValue, Record};

/// A user row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl User {
    pub fn new(id: u32, name: &str, email: &str, role: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            email: email.to_string(),
            role: role.to_string(),
        }
    }
}

impl Record for User {
    fn field(&self, key: &str) -> FieldValue<'_> {
        match key {
            "id" => FieldValue::Number(f64::from(self.id)),
            "name" => FieldValue::Text(&self.name),
            "email" => FieldValue::Text(&self.email),
            "role" => FieldValue::Text(&self.role),
            _ => FieldValue::Missing,
        }
    }
}

/// The three users shown by the table stories.
pub fn story_users() -> Vec<User> {
    vec![
        User::new(1, "Alice Smith", "alice@example.com", "Admin"),
        User::new(2, "Bob Johnson", "bob@example.com", "User"),
        User::new(3, "Charlie Brown", "charlie@example.com", "User"),
    ]
}

/// The five users shown on the showcase screen.
pub fn showcase_users() -> Vec<User> {
    let mut users = story_users();
    users.push(User::new(4, "David Wilson", "david@example.com", "Editor"));
    users.push(User::new(5, "Eve Davis", "eve@example.com", "User"));
    users
}

/// Name (sortable), Email, Role (sortable).
pub fn user_columns() -> Vec<Column<User>> {
    vec![
        Column::new("name", "Name").sortable(),
        Column::new("email", "Email"),
        Column::new("role", "Role").sortable(),
    ]
}

/// The story columns plus a sortable id and a colored role badge.
pub fn showcase_columns() -> Vec<Column<User>> {
    vec![
        Column::new("id", "Id").sortable(),
        Column::new("name", "Name").sortable(),
        Column::new("email", "Email"),
        Column::new("role", "Role").sortable().with_render(role_badge),
    ]
}

fn role_badge(user: &User) -> Line<'static> {
    let color = match user.role.as_str() {
        "Admin" => Color::Magenta,
        "Editor" => Color::Yellow,
        _ => Color::Green,
    };
    Line::from(Span::styled(user.role.clone(), Style::default().fg(color)))
}
