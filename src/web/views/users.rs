//! Admin user pages.

use crate::{
    features::{
        forms::FieldErrors,
        users::{
            actions::{CREATE_USER, DELETE_USER, UPDATE_USER},
            schema::{CreateUserData, EditUserData},
            types::{ListQuery, UserPage, UserRecord},
        },
    },
    web::views::{context, display_name, form::FormView, Flash, Page, Templates},
};
use serde::Serialize;
use url::form_urlencoded;

const ROLE_OPTIONS: [(&str, &str); 2] = [("user", "User"), ("admin", "Admin")];

/// Query-string notices understood by the user list.
#[must_use]
pub fn list_notice(notice: Option<&str>) -> Option<&'static str> {
    match notice? {
        "created" => Some(CREATE_USER.success),
        "updated" => Some(UPDATE_USER.success),
        "deleted" => Some(DELETE_USER.success),
        _ => None,
    }
}

/// Path of a user page, `suffix` being `""`, `"/edit"` or `"/delete"`. The
/// result is percent-encoded and safe to emit unescaped.
#[must_use]
pub fn user_path(id: &str, suffix: &str) -> String {
    let id: String = form_urlencoded::byte_serialize(id.as_bytes()).collect();
    // `+` means a literal plus inside a path.
    format!("/admin/users/{}{suffix}", id.replace('+', "%20"))
}

fn list_path(query: &ListQuery, page: u32) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("page", &page.to_string())
        .append_pair("size", &query.size.to_string())
        .append_pair("search", &query.search)
        .finish();
    format!("/admin/users?{query}")
}

#[derive(Serialize)]
struct Row<'a> {
    name: &'a str,
    email: &'a str,
    role: &'a str,
    detail: String,
    edit: String,
}

#[derive(Serialize)]
struct Entry<'a> {
    label: &'static str,
    value: &'a str,
}

/// # Errors
/// Returns an error if the template fails to render.
pub fn list(
    templates: &Templates,
    viewer: &UserRecord,
    page_data: &UserPage,
    query: &ListQuery,
    flash: Option<Flash<'_>>,
) -> Page {
    let rows: Vec<Row<'_>> = page_data
        .users
        .iter()
        .map(|user| Row {
            name: display_name(user),
            email: &user.email,
            role: user.role.as_str(),
            detail: user_path(&user.id, ""),
            edit: user_path(&user.id, "/edit"),
        })
        .collect();

    let pagination = &page_data.pagination;
    let current = pagination.page.max(1);
    let total_pages = pagination.total_pages.max(1);
    let prev = (current > 1).then(|| list_path(query, current - 1));
    let next = (current < total_pages).then(|| list_path(query, current + 1));

    let mut context = context("Users", Some(viewer), flash);
    context.insert("search", &query.search);
    context.insert("size", &query.size);
    context.insert("users", &rows);
    context.insert("page", &current);
    context.insert("total_pages", &total_pages);
    context.insert("total", &pagination.total);
    context.insert("prev", &prev);
    context.insert("next", &next);
    templates.render("users/list.html", &context)
}

/// # Errors
/// Returns an error if the template fails to render.
pub fn detail(templates: &Templates, viewer: &UserRecord, user: &UserRecord) -> Page {
    let mut rows = vec![
        Entry {
            label: "Name",
            value: &user.name,
        },
        Entry {
            label: "Email",
            value: &user.email,
        },
    ];
    if let Some(username) = &user.username {
        rows.push(Entry {
            label: "Username",
            value: username,
        });
    }
    rows.push(Entry {
        label: "Role",
        value: user.role.as_str(),
    });
    if let Some(created_at) = &user.created_at {
        rows.push(Entry {
            label: "Created",
            value: created_at,
        });
    }
    if let Some(updated_at) = &user.updated_at {
        rows.push(Entry {
            label: "Updated",
            value: updated_at,
        });
    }

    let mut context = context(display_name(user), Some(viewer), None);
    context.insert("rows", &rows);
    context.insert("image_url", &user.image_url);
    context.insert("edit", &user_path(&user.id, "/edit"));
    context.insert("delete", &user_path(&user.id, "/delete"));
    templates.render("users/detail.html", &context)
}

/// # Errors
/// Returns an error if the template fails to render.
pub fn create(
    templates: &Templates,
    viewer: &UserRecord,
    data: &CreateUserData,
    errors: Option<&FieldErrors>,
    flash: Option<Flash<'_>>,
) -> Page {
    let form = FormView::new("/admin/users/create", errors, "Create user")
        .multipart()
        .input("name", "Name", "text", &data.name)
        .input("email", "Email", "email", &data.email)
        .input("password", "Password", "password", "")
        .input("confirm_password", "Confirm password", "password", "")
        .select("role", "Role", &ROLE_OPTIONS, &data.role)
        .file("image", "Image", "image/*");
    let mut context = context("New user", Some(viewer), flash);
    context.insert("form", &form);
    templates.render("users/create.html", &context)
}

/// # Errors
/// Returns an error if the template fails to render.
pub fn edit(
    templates: &Templates,
    viewer: &UserRecord,
    id: &str,
    data: &EditUserData,
    errors: Option<&FieldErrors>,
    flash: Option<Flash<'_>>,
) -> Page {
    let form = FormView::new(user_path(id, "/edit"), errors, "Save changes")
        .input("name", "Name", "text", &data.name)
        .input("email", "Email", "email", &data.email)
        .select("role", "Role", &ROLE_OPTIONS, &data.role);
    let mut context = context("Edit user", Some(viewer), flash);
    context.insert("form", &form);
    context.insert("cancel", &user_path(id, ""));
    templates.render("users/edit.html", &context)
}

/// Edit form prefilled from the backend record.
#[must_use]
pub fn edit_data(user: &UserRecord) -> EditUserData {
    EditUserData {
        name: user.name.clone(),
        email: user.email.clone(),
        role: user.role.as_str().to_string(),
    }
}
