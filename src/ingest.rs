use rdf::{FieldMapper, PathPair, Quoting, Record};
use thiserror::Error;
use tracing::{debug, info};

use crate::gateway::{StorageGateway, TransportError};

#[derive(Debug, Error)]
pub(crate) enum IngestError {
    #[error(transparent)]
    Record(#[from] rdf::Error),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Container location and update body for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Prepared {
    pub(crate) paths: PathPair,
    pub(crate) update: String,
}

/// Turns records into Fedora containers under `base_url`.
pub(crate) struct Pipeline {
    base_url: String,
    mapper: FieldMapper,
    quoting: Quoting,
}

impl Pipeline {
    pub(crate) fn new(
        base_url: impl Into<String>,
        mapper: FieldMapper,
        quoting: Quoting,
    ) -> Self {
        Pipeline {
            base_url: base_url.into(),
            mapper,
            quoting,
        }
    }

    /// Resolves paths and renders the update without contacting the server.
    ///
    /// The containment relation is merged after the mapped properties so its
    /// line comes last in the update.
    pub(crate) fn prepare(&self, record: &Record<'_>) -> Result<Prepared, rdf::Error> {
        let paths = rdf::resolve_paths(&self.base_url, record)?;
        let triples = self.mapper.map(record)?.merge(rdf::containment(&paths));
        let update = rdf::insert_request(&triples, self.quoting)?;
        Ok(Prepared { paths, update })
    }

    /// Creates the record's container, then patches its metadata.
    ///
    /// The two calls are not transactional: if the patch fails the empty
    /// container stays behind.
    pub(crate) async fn create_container_with_metadata<G: StorageGateway>(
        &self,
        gateway: &G,
        record: &Record<'_>,
    ) -> Result<PathPair, IngestError> {
        let Prepared { paths, update } = self.prepare(record)?;

        gateway.create_container(&paths.container).await?;
        info!(target: "ingest", container = %paths.container, "created container");

        debug!(target: "ingest", container = %paths.container, %update, "patching triples");
        gateway
            .patch_container_triples(&paths.container, &update)
            .await?;
        info!(
            target: "ingest",
            container = %paths.container,
            parent = ?paths.parent,
            "attached metadata"
        );

        Ok(paths)
    }
}
