use tracing::debug;

use quiz_core::model::{GameInstance, Language};

use crate::content::ContentSource;
use crate::error::ContentError;
use crate::random::{RandomSource, select_instance};

/// Run one acquisition cycle: fetch the index, draw an instance, fetch it.
///
/// The steps run strictly in order. An index that does not list any instance fails
/// before a draw is made, so the instance endpoint is never called for it.
///
/// # Errors
///
/// Returns `ContentError` from whichever step failed.
pub async fn acquire_instance(
    source: &dyn ContentSource,
    random: &dyn RandomSource,
    language: &Language,
) -> Result<GameInstance, ContentError> {
    let index = source.fetch_index(language).await?;
    let selected = select_instance(&index, random.next_unit());
    debug!(
        %language,
        instances = index.instance_count().get(),
        selected = selected.value(),
        "selected game instance"
    );
    source.fetch_instance(language, selected).await
}
