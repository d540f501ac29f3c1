macro_rules! impl_client_new {
    ($client_name:ident, $entity:ty) => {
        impl $client_name {
            pub fn new(api: std::sync::Arc<crate::gateway::ApiService>) -> Self {
                Self {
                    inner: crate::clients::HttpAccessor::new(api),
                }
            }
        }
    };
}

macro_rules! impl_client_methods {
    ($client_name:ident, $entity:ty, $singular:ident, $plural:ident) => {
        paste::paste! {
            impl $client_name {
                #[tracing::instrument(skip(self, cancel))]
                pub async fn [<get_ $plural>](
                    &self,
                    cancel: &tokio_util::sync::CancellationToken,
                ) -> Result<Vec<$entity>, crate::error::ApiError> {
                    tracing::debug!("Sending request");
                    <crate::clients::HttpAccessor<$entity> as crate::clients::Accessor<$entity>>::get_all(&self.inner, cancel).await
                }

                #[tracing::instrument(skip(self, cancel))]
                pub async fn [<get_ $singular>](
                    &self,
                    id: u64,
                    cancel: &tokio_util::sync::CancellationToken,
                ) -> Result<$entity, crate::error::ApiError> {
                    tracing::debug!("Sending request");
                    <crate::clients::HttpAccessor<$entity> as crate::clients::Accessor<$entity>>::get_by_id(&self.inner, id, cancel).await
                }

                #[tracing::instrument(skip(self, draft, cancel))]
                pub async fn [<create_ $singular>](
                    &self,
                    draft: <$entity as crate::actor_framework::Entity>::Draft,
                    cancel: &tokio_util::sync::CancellationToken,
                ) -> Result<crate::gateway::ApiResponse, crate::error::ApiError> {
                    tracing::debug!("Sending request");
                    <crate::clients::HttpAccessor<$entity> as crate::clients::Accessor<$entity>>::create(&self.inner, draft, cancel).await
                }

                #[tracing::instrument(skip(self, draft, cancel))]
                pub async fn [<update_ $singular>](
                    &self,
                    id: u64,
                    draft: <$entity as crate::actor_framework::Entity>::Draft,
                    cancel: &tokio_util::sync::CancellationToken,
                ) -> Result<crate::gateway::ApiResponse, crate::error::ApiError> {
                    tracing::debug!("Sending request");
                    <crate::clients::HttpAccessor<$entity> as crate::clients::Accessor<$entity>>::update(&self.inner, id, draft, cancel).await
                }

                #[tracing::instrument(skip(self, cancel))]
                pub async fn [<delete_ $singular>](
                    &self,
                    id: u64,
                    cancel: &tokio_util::sync::CancellationToken,
                ) -> Result<crate::gateway::ApiResponse, crate::error::ApiError> {
                    tracing::debug!("Sending request");
                    <crate::clients::HttpAccessor<$entity> as crate::clients::Accessor<$entity>>::delete(&self.inner, id, cancel).await
                }
            }

            #[async_trait::async_trait]
            impl crate::clients::Accessor<$entity> for $client_name {
                async fn get_all(
                    &self,
                    cancel: &tokio_util::sync::CancellationToken,
                ) -> Result<Vec<$entity>, crate::error::ApiError> {
                    self.[<get_ $plural>](cancel).await
                }

                async fn get_by_id(
                    &self,
                    id: u64,
                    cancel: &tokio_util::sync::CancellationToken,
                ) -> Result<$entity, crate::error::ApiError> {
                    self.[<get_ $singular>](id, cancel).await
                }

                async fn create(
                    &self,
                    draft: <$entity as crate::actor_framework::Entity>::Draft,
                    cancel: &tokio_util::sync::CancellationToken,
                ) -> Result<crate::gateway::ApiResponse, crate::error::ApiError> {
                    self.[<create_ $singular>](draft, cancel).await
                }

                async fn update(
                    &self,
                    id: u64,
                    draft: <$entity as crate::actor_framework::Entity>::Draft,
                    cancel: &tokio_util::sync::CancellationToken,
                ) -> Result<crate::gateway::ApiResponse, crate::error::ApiError> {
                    self.[<update_ $singular>](id, draft, cancel).await
                }

                async fn delete(
                    &self,
                    id: u64,
                    cancel: &tokio_util::sync::CancellationToken,
                ) -> Result<crate::gateway::ApiResponse, crate::error::ApiError> {
                    self.[<delete_ $singular>](id, cancel).await
                }
            }
        }
    };
}

macro_rules! impl_basic_client {
    ($client_name:ident, $entity:ty, $singular:ident, $plural:ident) => {
        impl_client_new!($client_name, $entity);
        impl_client_methods!($client_name, $entity, $singular, $plural);
    };
}
