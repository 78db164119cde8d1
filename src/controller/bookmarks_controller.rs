// src/controller/bookmarks_controller.rs
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::application::error::ApplicationError;
use crate::application::services::bookmark_service::BookmarkService;
use crate::application::services::tag_service::TagService;
use crate::controller::error::{ControllerError, ControllerResult};
use crate::controller::flash::{self as messages, Flash};
use crate::controller::request::{Method, Request};
use crate::controller::response::{Location, Response, View};
use crate::domain::authorization::Action;
use crate::domain::bookmark::BookmarkForm;
use crate::domain::repositories::query::{PageRequest, TagFilter};
use crate::domain::user::Identity;
use crate::domain::validation::ValidationErrors;

const DELETE_METHODS: [Method; 2] = [Method::Post, Method::Delete];
const EDIT_METHODS: [Method; 3] = [Method::Post, Method::Put, Method::Patch];

/// Per-controller access policy. Controllers without their own rule deny everything.
pub trait Authorize {
    fn is_authorized(&self, _user: &Identity, _request: &Request) -> ControllerResult<bool> {
        Ok(false)
    }
}

#[derive(Debug)]
pub struct BookmarksController {
    bookmarks: Arc<dyn BookmarkService>,
    tags: Arc<dyn TagService>,
    page_size: usize,
}

impl Authorize for BookmarksController {
    fn is_authorized(&self, user: &Identity, request: &Request) -> ControllerResult<bool> {
        if request.action.is_exempt() {
            return Ok(true);
        }
        let bookmark_id = request.bookmark_id()?;
        Ok(self
            .bookmarks
            .is_authorized(user, request.action, bookmark_id)?)
    }
}

impl BookmarksController {
    pub fn new(
        bookmarks: Arc<dyn BookmarkService>,
        tags: Arc<dyn TagService>,
        page_size: usize,
    ) -> Self {
        Self {
            bookmarks,
            tags,
            page_size,
        }
    }

    /// Run one request on behalf of `user`.
    ///
    /// Order: verb restrictions, then authorization, then the action itself.
    #[instrument(
        skip(self, user, request, flash),
        level = "debug",
        fields(user = user.id, action = %request.action)
    )]
    pub fn handle(
        &self,
        user: &Identity,
        request: &Request,
        flash: &mut Flash,
    ) -> ControllerResult<Response> {
        if request.action == Action::Delete && !request.method.is_any(&DELETE_METHODS) {
            return Err(ControllerError::MethodNotAllowed {
                allowed: DELETE_METHODS.to_vec(),
            });
        }

        if !self.is_authorized(user, request)? {
            warn!(
                "User {} denied '{}' on {:?}",
                user.id, request.action, request.pass
            );
            flash.error(messages::UNAUTHORIZED);
            let location = request
                .referer
                .clone()
                .map(Location::Referer)
                .unwrap_or(Location::Login);
            return Ok(Response::Redirect(location));
        }

        match request.action {
            Action::Index => self.index(user, request),
            Action::View => self.view(request),
            Action::Add => self.add(user, request, flash),
            Action::Edit => self.edit(user, request, flash),
            Action::Delete => self.delete(request, flash),
            Action::Tags => self.tags(request),
        }
    }

    fn index(&self, user: &Identity, request: &Request) -> ControllerResult<Response> {
        let page = PageRequest::new(request.page.unwrap_or(1), self.page_size);
        let page = self.bookmarks.list_bookmarks(user.id, page)?;
        Ok(Response::Render(View::Index(page)))
    }

    fn view(&self, request: &Request) -> ControllerResult<Response> {
        let id = request.require_bookmark_id()?;
        let (bookmark, owner) = self.bookmarks.get_bookmark_with_owner(id)?;
        Ok(Response::Render(View::Detail { bookmark, owner }))
    }

    fn add(
        &self,
        user: &Identity,
        request: &Request,
        flash: &mut Flash,
    ) -> ControllerResult<Response> {
        if request.method != Method::Post {
            return self.form(BookmarkForm::default(), ValidationErrors::new());
        }

        let result = self.bookmarks.create_bookmark(user, &request.data);
        self.after_save(result.map(|_| ()), request, flash)
    }

    fn edit(
        &self,
        user: &Identity,
        request: &Request,
        flash: &mut Flash,
    ) -> ControllerResult<Response> {
        let id = request.require_bookmark_id()?;

        if !request.method.is_any(&EDIT_METHODS) {
            let bookmark = self.bookmarks.get_bookmark(id)?;
            return self.form(BookmarkForm::from_bookmark(&bookmark), ValidationErrors::new());
        }

        let result = self.bookmarks.update_bookmark(user, id, &request.data);
        self.after_save(result.map(|_| ()), request, flash)
    }

    /// Success redirects to the listing; validation failure re-renders the
    /// submitted values together with the field errors.
    fn after_save(
        &self,
        result: Result<(), ApplicationError>,
        request: &Request,
        flash: &mut Flash,
    ) -> ControllerResult<Response> {
        match result {
            Ok(()) => {
                flash.success(messages::SAVED);
                Ok(Response::Redirect(Location::Index))
            }
            Err(ApplicationError::Validation(errors)) => {
                debug!("Save rejected: {}", errors);
                flash.error(messages::NOT_SAVED);
                self.form(request.data.clone(), errors)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn form(&self, form: BookmarkForm, errors: ValidationErrors) -> ControllerResult<Response> {
        let available_tags = self.tags.get_all_tags()?;
        Ok(Response::Render(View::Form {
            form,
            available_tags,
            errors,
        }))
    }

    fn delete(&self, request: &Request, flash: &mut Flash) -> ControllerResult<Response> {
        let id = request.require_bookmark_id()?;
        let bookmark = self.bookmarks.get_bookmark(id)?;

        match self.bookmarks.delete_bookmark(id) {
            Ok(true) => flash.success(messages::DELETED),
            Ok(false) => flash.error(messages::NOT_DELETED),
            Err(e) => {
                warn!("Failed to delete bookmark {}: {}", bookmark, e);
                flash.error(messages::NOT_DELETED);
            }
        }
        Ok(Response::Redirect(Location::Index))
    }

    fn tags(&self, request: &Request) -> ControllerResult<Response> {
        let filter = TagFilter::from_titles(request.pass.iter().cloned());
        let bookmarks = self.bookmarks.find_tagged(&filter)?;
        Ok(Response::Render(View::Tagged {
            bookmarks,
            tags: request.pass.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::flash::FlashLevel;
    use crate::domain::bookmark::Bookmark;
    use crate::domain::repositories::query::Page;
    use crate::domain::tag::Tag;
    use crate::domain::user::User;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts every call so tests can assert the store was never reached
    #[derive(Debug, Default)]
    struct CountingService {
        calls: AtomicUsize,
    }

    impl CountingService {
        fn hit(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    impl BookmarkService for CountingService {
        fn list_bookmarks(
            &self,
            _: i32,
            page: PageRequest,
        ) -> Result<Page<Bookmark>, ApplicationError> {
            self.hit();
            Ok(Page {
                items: vec![],
                page: page.page,
                limit: page.limit,
                total: 0,
            })
        }
        fn get_bookmark(&self, id: i32) -> Result<Bookmark, ApplicationError> {
            self.hit();
            Err(ApplicationError::BookmarkNotFound(id))
        }
        fn get_bookmark_with_owner(&self, id: i32) -> Result<(Bookmark, User), ApplicationError> {
            self.hit();
            Err(ApplicationError::BookmarkNotFound(id))
        }
        fn create_bookmark(&self, _: &Identity, _: &BookmarkForm) -> Result<Bookmark, ApplicationError> {
            self.hit();
            let mut errors = ValidationErrors::new();
            errors.add("title", "too long");
            Err(ApplicationError::Validation(errors))
        }
        fn update_bookmark(
            &self,
            _: &Identity,
            id: i32,
            _: &BookmarkForm,
        ) -> Result<Bookmark, ApplicationError> {
            self.hit();
            Err(ApplicationError::BookmarkNotFound(id))
        }
        fn delete_bookmark(&self, _: i32) -> Result<bool, ApplicationError> {
            self.hit();
            Ok(false)
        }
        fn find_tagged(&self, _: &TagFilter) -> Result<Vec<Bookmark>, ApplicationError> {
            self.hit();
            Ok(vec![])
        }
        fn is_authorized(
            &self,
            _: &Identity,
            _: Action,
            _: Option<i32>,
        ) -> Result<bool, ApplicationError> {
            self.hit();
            Ok(false)
        }
    }

    #[derive(Debug)]
    struct NoTags;

    impl TagService for NoTags {
        fn get_all_tags(&self) -> Result<Vec<Tag>, ApplicationError> {
            Ok(vec![])
        }
        fn normalize_tags(&self, _: &str) -> Result<Vec<Tag>, ApplicationError> {
            Ok(vec![])
        }
    }

    fn controller() -> (BookmarksController, Arc<CountingService>) {
        let service = Arc::new(CountingService::default());
        let controller = BookmarksController::new(service.clone(), Arc::new(NoTags), 20);
        (controller, service)
    }

    #[test]
    fn given_get_when_delete_then_method_not_allowed_without_store_access() {
        let (controller, service) = controller();
        let mut flash = Flash::new();

        let result = controller.handle(
            &Identity::new(1),
            &Request::get(Action::Delete).with_id(1),
            &mut flash,
        );

        assert!(matches!(
            result,
            Err(ControllerError::MethodNotAllowed { .. })
        ));
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
        assert!(flash.messages().is_empty());
    }

    #[test]
    fn given_denied_request_with_referer_when_handle_then_redirect_back() {
        let (controller, _) = controller();
        let mut flash = Flash::new();

        let response = controller
            .handle(
                &Identity::new(1),
                &Request::get(Action::Edit)
                    .with_id(4)
                    .with_referer("/bookmarks"),
                &mut flash,
            )
            .unwrap();

        assert_eq!(
            response,
            Response::Redirect(Location::Referer("/bookmarks".to_string()))
        );
        assert_eq!(flash.messages()[0].level, FlashLevel::Error);
        assert_eq!(flash.messages()[0].text, messages::UNAUTHORIZED);
    }

    #[test]
    fn given_denied_request_without_referer_when_handle_then_redirect_to_login() {
        let (controller, _) = controller();
        let mut flash = Flash::new();

        let response = controller
            .handle(&Identity::new(1), &Request::get(Action::View), &mut flash)
            .unwrap();

        assert_eq!(response, Response::Redirect(Location::Login));
    }

    #[test]
    fn given_validation_failure_when_add_then_form_rerendered_with_input() {
        let (controller, _) = controller();
        let mut flash = Flash::new();
        let data = BookmarkForm {
            title: Some("x".repeat(60)),
            tag_string: Some("a, b".to_string()),
            ..Default::default()
        };

        let response = controller
            .handle(
                &Identity::new(1),
                &Request::post(Action::Add, data.clone()),
                &mut flash,
            )
            .unwrap();

        match response {
            Response::Render(View::Form { form, errors, .. }) => {
                assert_eq!(form, data);
                assert!(errors.has_field("title"));
            }
            other => panic!("expected form, got {:?}", other),
        }
        assert_eq!(flash.messages()[0].text, messages::NOT_SAVED);
    }

    #[test]
    fn given_base_policy_when_not_overridden_then_denies() {
        struct Locked;
        impl Authorize for Locked {}

        assert!(!Locked
            .is_authorized(&Identity::new(1), &Request::get(Action::Index))
            .unwrap());
    }

    #[test]
    fn given_non_numeric_id_when_view_then_not_found() {
        let (controller, _) = controller();
        let mut flash = Flash::new();

        let result = controller.handle(
            &Identity::new(1),
            &Request::get(Action::View).with_pass(["nope"]),
            &mut flash,
        );
        assert!(matches!(result, Err(ControllerError::NotFound(_))));
    }
}
