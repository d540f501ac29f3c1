//! Per-entity CRUD view state: list data, add/edit modal, delete
//! confirmation and operation status.
//!
//! A view owns all of its state. Every operation takes `&mut self`, so at most
//! one mutation per view is ever in flight. Cancelling an operation leaves the
//! list and status as they were before it started.

mod state;

pub use state::*;

use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use crate::actor_framework::Entity;
use crate::clients::Accessor;
use crate::error::{ApiError, ViewError};
use crate::forms::FormState;
use crate::gateway::ApiResponse;

pub struct EntityView<T: Entity, A: Accessor<T>> {
    accessor: A,
    items: Vec<T>,
    status: Status,
    modal: Option<Modal<T>>,
    confirm: Option<ConfirmPrompt<T>>,
    cancel: CancellationToken,
}

impl<T: Entity, A: Accessor<T>> EntityView<T, A> {
    pub fn new(accessor: A) -> Self {
        Self {
            accessor,
            items: Vec::new(),
            status: Status::Idle,
            modal: None,
            confirm: None,
            cancel: CancellationToken::new(),
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn find(&self, id: u64) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn modal(&self) -> Option<&Modal<T>> {
        self.modal.as_ref()
    }

    pub fn confirm(&self) -> Option<&ConfirmPrompt<T>> {
        self.confirm.as_ref()
    }

    pub fn summary(&self) -> String {
        T::summarize(&self.items)
    }

    /// Token that aborts the operation in flight.
    ///
    /// Each cancellation is spent on one operation: afterwards the view arms a
    /// fresh token, so callers fetch it again for the next operation.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    fn begin(&mut self) -> Status {
        std::mem::replace(&mut self.status, Status::Loading)
    }

    fn fail(&mut self, previous: Status, error: ApiError) -> ViewError {
        if error == ApiError::Cancelled {
            info!(resource = T::RESOURCE.path(), "View operation cancelled");
            self.status = previous;
            self.cancel = CancellationToken::new();
        } else {
            warn!(resource = T::RESOURCE.path(), error = %error, "View operation failed");
            self.status = Status::Failed(error.to_string());
        }
        error.into()
    }

    /// Replaces the list with the server's. On failure the old list stays.
    #[instrument(skip(self), fields(resource = T::RESOURCE.path()))]
    pub async fn load(&mut self) -> Result<(), ViewError> {
        let previous = self.begin();
        match self.accessor.get_all(&self.cancel).await {
            Ok(items) => {
                info!(count = items.len(), "List loaded");
                self.items = items;
                self.status = Status::Success;
                Ok(())
            }
            Err(e) => Err(self.fail(previous, e)),
        }
    }

    /// Fetches one record fresh from the backend.
    #[instrument(skip(self), fields(resource = T::RESOURCE.path()))]
    pub async fn fetch(&mut self, id: u64) -> Result<T, ViewError> {
        let previous = self.begin();
        match self.accessor.get_by_id(id, &self.cancel).await {
            Ok(item) => {
                self.status = Status::Success;
                Ok(item)
            }
            Err(e) => Err(self.fail(previous, e)),
        }
    }

    /// Opens the add dialog (`None`) or the edit dialog for `target`.
    pub fn open_modal(&mut self, target: Option<T>) {
        self.modal = Some(match target {
            Some(record) => Modal::edit(record),
            None => Modal::create(),
        });
    }

    /// Opens the edit dialog for a listed record.
    pub fn open_edit(&mut self, id: u64) -> Result<(), ViewError> {
        let record = self.find(id).cloned().ok_or(ViewError::UnknownRecord(id))?;
        self.open_modal(Some(record));
        Ok(())
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    pub fn form_mut(&mut self) -> Result<&mut FormState<T>, ViewError> {
        self.modal
            .as_mut()
            .map(Modal::form_mut)
            .ok_or(ViewError::NoForm)
    }

    pub fn set_field(&mut self, key: &str, value: impl Into<String>) -> Result<(), ViewError> {
        self.form_mut()?.set(key, value)?;
        Ok(())
    }

    /// Validates the open form and creates or updates the record.
    ///
    /// Invalid input is reported in the form and never reaches the backend.
    /// A backend failure keeps the modal open and the list untouched; success
    /// closes the modal and reloads.
    #[instrument(skip(self), fields(resource = T::RESOURCE.path()))]
    pub async fn submit(&mut self) -> Result<ApiResponse, ViewError> {
        let modal = self.modal.as_mut().ok_or(ViewError::NoForm)?;
        let draft = modal.form_mut().validate()?;
        let target = modal.target().map(|record| record.id());

        let previous = self.begin();
        let result = match target {
            Some(id) => self.accessor.update(id, draft, &self.cancel).await,
            None => self.accessor.create(draft, &self.cancel).await,
        };
        let response = match result {
            Ok(response) => response,
            Err(e) => return Err(self.fail(previous, e)),
        };

        info!(?target, "Record saved");
        self.modal = None;
        self.status = Status::Success;
        self.load().await?;
        Ok(response)
    }

    /// Asks for confirmation before deleting a listed record.
    pub fn request_delete(&mut self, id: u64) -> Result<&ConfirmPrompt<T>, ViewError> {
        let record = self.find(id).cloned().ok_or(ViewError::UnknownRecord(id))?;
        Ok(&*self.confirm.insert(ConfirmPrompt::new(record)))
    }

    pub fn cancel_delete(&mut self) {
        self.confirm = None;
    }

    /// Deletes the record awaiting confirmation, then reloads.
    #[instrument(skip(self), fields(resource = T::RESOURCE.path()))]
    pub async fn confirm_delete(&mut self) -> Result<ApiResponse, ViewError> {
        let prompt = self.confirm.take().ok_or(ViewError::NothingToConfirm)?;
        let id = prompt.target().id();

        let previous = self.begin();
        let response = match self.accessor.delete(id, &self.cancel).await {
            Ok(response) => response,
            Err(e) => return Err(self.fail(previous, e)),
        };

        info!(id, "Record deleted");
        self.status = Status::Success;
        self.load().await?;
        Ok(response)
    }

    pub fn dismiss_error(&mut self) {
        if let Status::Failed(_) = self.status {
            self.status = Status::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor_framework::ResourceClient;
    use crate::domain::{Product, ProductDraft};
    use crate::mock_data;
    use crate::mock_framework::{
        create_mock_client, expect_create, expect_delete, expect_get, expect_list, expect_update,
    };
    use serde_json::json;

    fn product_view() -> (
        EntityView<Product, ResourceClient<Product>>,
        tokio::sync::mpsc::Receiver<crate::actor_framework::ResourceRequest<Product>>,
    ) {
        let (client, receiver) = create_mock_client::<Product>(10);
        (EntityView::new(client), receiver)
    }

    async fn loaded_view() -> (
        EntityView<Product, ResourceClient<Product>>,
        tokio::sync::mpsc::Receiver<crate::actor_framework::ResourceRequest<Product>>,
    ) {
        let (mut view, mut rx) = product_view();
        let (loaded, _) = tokio::join!(view.load(), async {
            let responder = expect_list(&mut rx).await.expect("Expected List request");
            responder.send(Ok(mock_data::products())).unwrap();
        });
        loaded.unwrap();
        (view, rx)
    }

    #[tokio::test]
    async fn load_replaces_items() {
        let (view, _rx) = loaded_view().await;
        assert_eq!(view.items().len(), 3);
        assert_eq!(view.status(), &Status::Success);
        assert_eq!(
            view.summary(),
            "3 productos · 2 activos · 1 descontinuados"
        );
    }

    #[tokio::test]
    async fn failed_load_keeps_previous_items() {
        let (mut view, mut rx) = loaded_view().await;

        let (result, _) = tokio::join!(view.load(), async {
            let responder = expect_list(&mut rx).await.expect("Expected List request");
            responder
                .send(Err(ApiError::from_response(503, "")))
                .unwrap();
        });

        assert!(result.is_err());
        assert_eq!(view.items().len(), 3);
        assert_eq!(view.status().error(), Some("HTTP error! status: 503"));

        view.dismiss_error();
        assert_eq!(view.status(), &Status::Idle);
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_the_backend() {
        let (mut view, mut rx) = loaded_view().await;
        view.open_modal(None);
        view.set_field("nombreProducto", "   ").unwrap();
        view.set_field("precioUnitario", "0").unwrap();

        let err = view.submit().await.unwrap_err();

        let ViewError::Validation(errors) = err else {
            panic!("expected validation failure, got {err:?}");
        };
        assert_eq!(errors.get("nombreProducto"), Some("El nombre del producto es requerido"));
        assert_eq!(errors.get("precioUnitario"), Some("Debe ser un precio válido mayor a 0"));
        assert!(rx.try_recv().is_err());
        assert!(view.modal().is_some());
        assert_eq!(view.status(), &Status::Success);
    }

    #[tokio::test]
    async fn creating_a_product_sends_the_converted_draft_and_reloads() {
        let (mut view, mut rx) = loaded_view().await;
        view.open_modal(None);
        assert_eq!(view.modal().unwrap().title(), "Añadir Nuevo Producto");
        for (key, value) in [
            ("nombreProducto", "Cerveza Lager"),
            ("idProveedor", "101"),
            ("precioUnitario", "2.50"),
            ("tipoPresentacion", "Six pack"),
            ("estaDescontinuado", "false"),
        ] {
            view.set_field(key, value).unwrap();
        }

        let (result, _) = tokio::join!(view.submit(), async {
            let (draft, responder) = expect_create(&mut rx).await.expect("Expected Create request");
            assert_eq!(
                draft,
                ProductDraft {
                    name: "Cerveza Lager".into(),
                    supplier_id: 101,
                    unit_price: 2.5,
                    package: "Six pack".into(),
                    is_discontinued: false,
                }
            );
            responder.send(Ok(Product::from_draft(4, draft))).unwrap();

            let responder = expect_list(&mut rx).await.expect("Expected reload");
            let mut products = mock_data::products();
            products.push(Product::from_draft(4, products[0].to_draft()));
            responder.send(Ok(products)).unwrap();
        });

        let response = result.unwrap();
        assert_eq!(response.into_json().unwrap()["id"], json!(4));
        assert!(view.modal().is_none());
        assert_eq!(view.items().len(), 4);
    }

    #[tokio::test]
    async fn failed_update_keeps_modal_and_list() {
        let (mut view, mut rx) = loaded_view().await;
        view.open_edit(2).unwrap();
        assert_eq!(view.modal().unwrap().title(), "Editar Producto");
        view.set_field("precioUnitario", "17.25").unwrap();

        let (result, _) = tokio::join!(view.submit(), async {
            let (id, draft, responder) = expect_update(&mut rx).await.expect("Expected Update request");
            assert_eq!(id, 2);
            assert_eq!(draft.unit_price, 17.25);
            responder
                .send(Err(ApiError::from_response(422, r#"{"message":"Precio inválido"}"#)))
                .unwrap();
        });

        assert_eq!(result.unwrap_err().to_string(), "Precio inválido");
        assert_eq!(view.status().error(), Some("Precio inválido"));
        assert!(view.modal().is_some());
        assert_eq!(view.items(), mock_data::products().as_slice());
    }

    #[tokio::test]
    async fn delete_requires_confirmation() {
        let (mut view, mut rx) = loaded_view().await;

        let prompt = view.request_delete(3).unwrap();
        assert_eq!(prompt.target().name, "Whisky");
        view.cancel_delete();
        assert_eq!(
            view.confirm_delete().await.unwrap_err(),
            ViewError::NothingToConfirm
        );
        assert!(rx.try_recv().is_err());

        view.request_delete(3).unwrap();
        let (result, _) = tokio::join!(view.confirm_delete(), async {
            let (id, responder) = expect_delete(&mut rx).await.expect("Expected Delete request");
            assert_eq!(id, 3);
            responder.send(Ok(())).unwrap();

            let responder = expect_list(&mut rx).await.expect("Expected reload");
            let mut products = mock_data::products();
            products.truncate(2);
            responder.send(Ok(products)).unwrap();
        });

        result.unwrap();
        assert!(view.confirm().is_none());
        assert!(view.find(3).is_none());
    }

    #[tokio::test]
    async fn unknown_records_cannot_be_targeted() {
        let (mut view, _rx) = loaded_view().await;
        assert_eq!(view.open_edit(99).unwrap_err(), ViewError::UnknownRecord(99));
        assert_eq!(
            view.request_delete(99).unwrap_err(),
            ViewError::UnknownRecord(99)
        );
        assert_eq!(view.set_field("nombreProducto", "x").unwrap_err(), ViewError::NoForm);
    }

    #[tokio::test]
    async fn fetch_reads_a_single_record() {
        let (mut view, mut rx) = product_view();
        let (result, _) = tokio::join!(view.fetch(1), async {
            let (id, responder) = expect_get(&mut rx).await.expect("Expected Get request");
            assert_eq!(id, 1);
            responder.send(Ok(mock_data::products()[0].clone())).unwrap();
        });
        assert_eq!(result.unwrap().name, "Cerveza Lager");
    }

    #[tokio::test]
    async fn cancelled_load_leaves_status_and_list_untouched() {
        let (mut view, mut rx) = loaded_view().await;
        let token = view.cancellation_token();

        let (result, _responder) = tokio::join!(view.load(), async {
            let responder = expect_list(&mut rx).await.expect("Expected List request");
            token.cancel();
            responder
        });

        assert_eq!(result.unwrap_err(), ViewError::Api(ApiError::Cancelled));
        assert_eq!(view.status(), &Status::Success);
        assert_eq!(view.items(), mock_data::products().as_slice());
        assert!(!view.cancellation_token().is_cancelled());

        let (reloaded, _) = tokio::join!(view.load(), async {
            let responder = expect_list(&mut rx).await.expect("Expected second List request");
            responder.send(Ok(mock_data::products()[..1].to_vec())).unwrap();
        });
        reloaded.unwrap();
        assert_eq!(view.items().len(), 1);
    }

    #[tokio::test]
    async fn cancelled_update_keeps_the_modal_open() {
        let (mut view, mut rx) = loaded_view().await;
        view.open_edit(1).unwrap();
        let token = view.cancellation_token();

        let (result, _responder) = tokio::join!(view.submit(), async {
            let (_, _, responder) = expect_update(&mut rx).await.expect("Expected Update request");
            token.cancel();
            responder
        });

        assert_eq!(result.unwrap_err(), ViewError::Api(ApiError::Cancelled));
        assert_eq!(view.status(), &Status::Success);
        assert!(view.modal().is_some());
        assert!(rx.try_recv().is_err());
    }
}
