// src/cli/bookmark_commands.rs
use std::io::{self, Write};
use std::path::Path;

use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands};
use crate::cli::display::{self, Palette};
use crate::cli::error::{CliError, CliResult};
use crate::controller::{Flash, Location, Method, Request, Response, View};
use crate::domain::authorization::Action;
use crate::domain::bookmark::BookmarkForm;
use crate::domain::user::Identity;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::repositories::sqlite::connection::init_pool;

/// Create a new database and run all migrations on it
#[instrument(level = "debug")]
pub fn create_db(path: &str) -> CliResult<()> {
    if Path::new(path).exists() {
        return Err(CliError::InvalidInput(format!(
            "Database already exists at: {}. Please choose a different path or delete the existing file.",
            path
        )));
    }

    eprintln!("Creating new database at: {}", path);
    init_pool(path)?;
    eprintln!("Database created successfully at: {}", path);
    Ok(())
}

/// Translate a bookmark subcommand into a controller request
pub fn to_request(command: &Commands) -> CliResult<Request> {
    let request = match command {
        Commands::List { page } => Request::get(Action::Index).with_page(*page),
        Commands::Show { id } => Request::get(Action::View).with_pass([id.as_str()]),
        Commands::Add { fields } => Request::post(Action::Add, BookmarkForm::from(fields.clone())),
        Commands::Edit { id, fields } if fields.is_empty() => {
            Request::get(Action::Edit).with_pass([id.as_str()])
        }
        Commands::Edit { id, fields } => Request::new(Method::Patch, Action::Edit)
            .with_pass([id.as_str()])
            .with_data(BookmarkForm::from(fields.clone())),
        Commands::Delete { id } => {
            Request::new(Method::Delete, Action::Delete).with_pass([id.as_str()])
        }
        Commands::Tags { tags } => Request::get(Action::Tags).with_pass(tags.iter().cloned()),
        other => {
            return Err(CliError::InvalidInput(format!(
                "Not a bookmark command: {:?}",
                other
            )))
        }
    };
    Ok(request)
}

fn current_identity(cli: &Cli) -> CliResult<Identity> {
    cli.user.map(Identity::new).ok_or_else(|| {
        CliError::InvalidInput(
            "No user selected: pass --user <ID> or set TAGMARKS_USER".to_string(),
        )
    })
}

/// Run a bookmark subcommand through the controller and print the outcome.
///
/// Flash messages go to stderr, rendered views to stdout.
#[instrument(skip(services, cli), level = "debug")]
pub fn execute(services: &ServiceContainer, cli: &Cli) -> CliResult<()> {
    let command = cli
        .command
        .as_ref()
        .ok_or_else(|| CliError::InvalidInput("No command given".to_string()))?;
    let identity = current_identity(cli)?;
    let request = to_request(command)?;
    debug!("Dispatching {:?} for user {}", request, identity.id);

    let mut flash = Flash::new();
    let result = services.controller.handle(&identity, &request, &mut flash);

    let palette = Palette::detect(cli.no_color);
    display::write_flash(&mut io::stderr(), &flash.take(), palette)?;

    let response = result?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_response(&mut out, &request, response, cli.json, palette)
}

/// Print a response; redirects after a denial and rejected saves become errors
pub fn write_response<W: Write>(
    out: &mut W,
    request: &Request,
    response: Response,
    json: bool,
    palette: Palette,
) -> CliResult<()> {
    match response {
        Response::Redirect(Location::Index) => Ok(()),
        Response::Redirect(location) => Err(CliError::Denied(format!(
            "{} on {} (redirected to {:?})",
            request.action,
            request.pass.join("/"),
            location
        ))),
        Response::Render(view) => {
            if json {
                display::render_json(out, &view)?;
            } else {
                display::render_text(out, &view, palette)?;
            }
            match view {
                View::Form { errors, .. } if request.method != Method::Get && !errors.is_empty() => {
                    Err(CliError::Rejected(errors))
                }
                _ => Ok(()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::BookmarkFields;
    use crate::domain::validation::ValidationErrors;

    #[test]
    fn given_edit_without_fields_when_to_request_then_get_form() {
        let command = Commands::Edit {
            id: "7".into(),
            fields: BookmarkFields::default(),
        };
        let request = to_request(&command).unwrap();
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.action, Action::Edit);
        assert_eq!(request.pass, vec!["7"]);
    }

    #[test]
    fn given_edit_with_tags_when_to_request_then_patch_with_tag_string() {
        let command = Commands::Edit {
            id: "7".into(),
            fields: BookmarkFields {
                tags: Some("a,b".into()),
                ..Default::default()
            },
        };
        let request = to_request(&command).unwrap();
        assert_eq!(request.method, Method::Patch);
        assert_eq!(request.data.tag_string.as_deref(), Some("a,b"));
        assert_eq!(request.data.user_id, None);
    }

    #[test]
    fn given_delete_when_to_request_then_delete_verb() {
        let request = to_request(&Commands::Delete { id: "3".into() }).unwrap();
        assert_eq!(request.method, Method::Delete);
        assert_eq!(request.bookmark_id().unwrap(), Some(3));
    }

    #[test]
    fn given_create_db_when_to_request_then_error() {
        assert!(to_request(&Commands::CreateDb { path: "x".into() }).is_err());
    }

    #[test]
    fn given_login_redirect_when_write_response_then_denied() {
        let request = Request::get(Action::View).with_id(1);
        let mut out = Vec::new();
        let result = write_response(
            &mut out,
            &request,
            Response::Redirect(Location::Login),
            false,
            Palette::new(false),
        );
        assert!(matches!(result, Err(CliError::Denied(_))));
    }

    #[test]
    fn given_posted_form_with_errors_when_write_response_then_rejected() {
        let mut errors = ValidationErrors::new();
        errors.add("title", "too long");
        let request = Request::post(Action::Add, BookmarkForm::default());
        let view = View::Form {
            form: BookmarkForm::default(),
            available_tags: vec![],
            errors,
        };
        let mut out = Vec::new();
        let result = write_response(
            &mut out,
            &request,
            Response::Render(view),
            false,
            Palette::new(false),
        );
        assert!(matches!(result, Err(CliError::Rejected(_))));
        assert!(String::from_utf8(out).unwrap().contains("too long"));
    }
}
