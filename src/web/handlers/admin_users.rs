//! Admin user management. Every handler here sits behind `require_admin` and
//! forwards the session token to the backend.

use crate::{
    api::ApiClient,
    features::{
        auth::{
            guards::{CurrentUser, ADMIN_LANDING_PATH},
            session::{CookieSession, SessionStore},
        },
        users::{
            actions::{
                handle_create_user, handle_delete_user, handle_get_all_users, handle_get_one_user,
                handle_update_user,
            },
            schema::{CreateUserData, EditUserData},
            types::{ImageUpload, ListQuery, UserRecord},
        },
    },
    web::{
        handlers::invalid,
        views::{self, users as view, Flash, Page, RenderError, Templates},
    },
};
use axum::{
    extract::{multipart::MultipartError, Extension, Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tracing::{instrument, warn};

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub size: Option<String>,
    pub search: Option<String>,
    pub notice: Option<String>,
}

#[instrument(skip_all)]
pub async fn list(
    State(api): State<ApiClient>,
    State(templates): State<Templates>,
    Extension(CurrentUser(viewer)): Extension<CurrentUser>,
    session: CookieSession,
    Query(params): Query<ListParams>,
) -> Result<Response, RenderError> {
    let query = ListQuery::from_raw(
        params.page.as_deref(),
        params.size.as_deref(),
        params.search.as_deref(),
    );

    let result = handle_get_all_users(&api, session.token(), &query).await;
    match result.data {
        Some(page) if result.success => {
            let flash = view::list_notice(params.notice.as_deref()).map(Flash::Info);
            Ok(view::list(&templates, &viewer, &page, &query, flash)?.into_response())
        }
        _ => load_failed(&templates, "Users", &viewer, &result.message, "/home"),
    }
}

#[instrument(skip_all)]
pub async fn detail(
    State(api): State<ApiClient>,
    State(templates): State<Templates>,
    Extension(CurrentUser(viewer)): Extension<CurrentUser>,
    session: CookieSession,
    Path(id): Path<String>,
) -> Result<Response, RenderError> {
    let result = handle_get_one_user(&api, session.token(), &id).await;
    match result.data {
        Some(user) if result.success => {
            Ok(view::detail(&templates, &viewer, &user)?.into_response())
        }
        _ => load_failed(&templates, "User", &viewer, &result.message, ADMIN_LANDING_PATH),
    }
}

pub async fn create_form(
    State(templates): State<Templates>,
    Extension(CurrentUser(viewer)): Extension<CurrentUser>,
) -> Page {
    view::create(&templates, &viewer, &CreateUserData::default(), None, None)
}

#[instrument(skip_all)]
pub async fn create(
    State(api): State<ApiClient>,
    State(templates): State<Templates>,
    Extension(CurrentUser(viewer)): Extension<CurrentUser>,
    session: CookieSession,
    multipart: Multipart,
) -> Result<Response, RenderError> {
    let (data, image) = match read_create_form(multipart).await {
        Ok(form) => form,
        Err(err) => {
            warn!("Unreadable user form: {err}");
            let page = view::create(
                &templates,
                &viewer,
                &CreateUserData::default(),
                None,
                Some(Flash::Error("The form could not be read. Please try again.")),
            )?;
            return Ok((StatusCode::BAD_REQUEST, page).into_response());
        }
    };

    if let Err(errors) = data.check() {
        return Ok(invalid(view::create(&templates, &viewer, &data, Some(&errors), None)?));
    }

    let result = handle_create_user(&api, session.token(), &data, image).await;
    if result.success {
        Ok(Redirect::to(&format!("{ADMIN_LANDING_PATH}?notice=created")).into_response())
    } else {
        let page = view::create(
            &templates,
            &viewer,
            &data,
            None,
            Some(Flash::Error(&result.message)),
        )?;
        Ok(page.into_response())
    }
}

#[instrument(skip_all)]
pub async fn edit_form(
    State(api): State<ApiClient>,
    State(templates): State<Templates>,
    Extension(CurrentUser(viewer)): Extension<CurrentUser>,
    session: CookieSession,
    Path(id): Path<String>,
) -> Result<Response, RenderError> {
    let result = handle_get_one_user(&api, session.token(), &id).await;
    match result.data {
        Some(user) if result.success => {
            let page = view::edit(&templates, &viewer, &id, &view::edit_data(&user), None, None)?;
            Ok(page.into_response())
        }
        _ => load_failed(&templates, "Edit user", &viewer, &result.message, ADMIN_LANDING_PATH),
    }
}

#[instrument(skip_all)]
pub async fn edit(
    State(api): State<ApiClient>,
    State(templates): State<Templates>,
    Extension(CurrentUser(viewer)): Extension<CurrentUser>,
    session: CookieSession,
    Path(id): Path<String>,
    Form(data): Form<EditUserData>,
) -> Result<Response, RenderError> {
    if let Err(errors) = data.check() {
        return Ok(invalid(view::edit(&templates, &viewer, &id, &data, Some(&errors), None)?));
    }

    let result = handle_update_user(&api, session.token(), &id, &data).await;
    if result.success {
        Ok(Redirect::to(&format!("{ADMIN_LANDING_PATH}?notice=updated")).into_response())
    } else {
        let page = view::edit(
            &templates,
            &viewer,
            &id,
            &data,
            None,
            Some(Flash::Error(&result.message)),
        )?;
        Ok(page.into_response())
    }
}

#[instrument(skip_all)]
pub async fn delete(
    State(api): State<ApiClient>,
    State(templates): State<Templates>,
    Extension(CurrentUser(viewer)): Extension<CurrentUser>,
    session: CookieSession,
    Path(id): Path<String>,
) -> Result<Response, RenderError> {
    let result = handle_delete_user(&api, session.token(), &id).await;
    if result.success {
        Ok(Redirect::to(&format!("{ADMIN_LANDING_PATH}?notice=deleted")).into_response())
    } else {
        let page = views::error_page(
            &templates,
            "Delete user",
            Some(&viewer),
            &result.message,
            &view::user_path(&id, ""),
        )?;
        Ok(page.into_response())
    }
}

fn load_failed(
    templates: &Templates,
    title: &str,
    viewer: &UserRecord,
    message: &str,
    back: &str,
) -> Result<Response, RenderError> {
    let page = views::error_page(templates, title, Some(viewer), message, back)?;
    Ok((StatusCode::BAD_GATEWAY, page).into_response())
}

/// Collects the text fields and the optional image of the create form. An
/// empty file input is not an image.
async fn read_create_form(
    mut multipart: Multipart,
) -> Result<(CreateUserData, Option<ImageUpload>), MultipartError> {
    let mut data = CreateUserData::default();
    let mut image = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "name" => data.name = field.text().await?,
            "email" => data.email = field.text().await?,
            "password" => data.password = field.text().await?,
            "confirm_password" => data.confirm_password = field.text().await?,
            "role" => data.role = field.text().await?,
            "image" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await?;
                if !file_name.is_empty() && !bytes.is_empty() {
                    image = Some(ImageUpload {
                        file_name,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    Ok((data, image))
}
