use crate::domain::{
    common::entities::app_errors::CoreError,
    food_entry::{catalog::TriggerCatalog, ports::TriggerRepository},
};

/// Aggregate service over the pipeline's collaborators.
///
/// Holds one field per port plus the in-memory trigger catalog, which is
/// loaded from the store once at startup via [`Service::bootstrap`].
#[derive(Debug, Clone)]
pub struct Service<IP, RE, PD, D, DE, TR, PT, CT, L> {
    pub identity_provider: IP,
    pub raw_entry_repository: RE,
    pub predicted_dish_repository: PD,
    pub dish_repository: D,
    pub dish_event_repository: DE,
    pub trigger_repository: TR,
    pub predicted_dish_trigger_repository: PT,
    pub dish_trigger_repository: CT,
    pub llm_client: L,
    pub trigger_catalog: TriggerCatalog,
}

impl<IP, RE, PD, D, DE, TR, PT, CT, L> Service<IP, RE, PD, D, DE, TR, PT, CT, L> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        identity_provider: IP,
        raw_entry_repository: RE,
        predicted_dish_repository: PD,
        dish_repository: D,
        dish_event_repository: DE,
        trigger_repository: TR,
        predicted_dish_trigger_repository: PT,
        dish_trigger_repository: CT,
        llm_client: L,
        trigger_catalog: TriggerCatalog,
    ) -> Self {
        Self {
            identity_provider,
            raw_entry_repository,
            predicted_dish_repository,
            dish_repository,
            dish_event_repository,
            trigger_repository,
            predicted_dish_trigger_repository,
            dish_trigger_repository,
            llm_client,
            trigger_catalog,
        }
    }

    /// Builds the service with a trigger catalog loaded from the store.
    #[allow(clippy::too_many_arguments)]
    pub async fn bootstrap(
        identity_provider: IP,
        raw_entry_repository: RE,
        predicted_dish_repository: PD,
        dish_repository: D,
        dish_event_repository: DE,
        trigger_repository: TR,
        predicted_dish_trigger_repository: PT,
        dish_trigger_repository: CT,
        llm_client: L,
    ) -> Result<Self, CoreError>
    where
        TR: TriggerRepository,
    {
        let triggers = trigger_repository.list_triggers().await?;
        let trigger_catalog = TriggerCatalog::new(triggers);

        Ok(Self::new(
            identity_provider,
            raw_entry_repository,
            predicted_dish_repository,
            dish_repository,
            dish_event_repository,
            trigger_repository,
            predicted_dish_trigger_repository,
            dish_trigger_repository,
            llm_client,
            trigger_catalog,
        ))
    }
}
