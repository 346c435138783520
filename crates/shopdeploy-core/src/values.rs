//! Chart values mutation.
//!
//! The values file is treated as an opaque YAML tree: the two image
//! subtrees and the client ingress are rewritten in place and every
//! other field is carried through untouched. The required subtrees are
//! asserted before anything is written, so an incompatible chart never
//! produces a half-mutated document on disk.

use std::fs;
use std::path::Path;

use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::error::{DeployError, DeployResult};
use crate::types::ImageRef;

/// Rewrites image coordinates and ingress fields in the values file at
/// `path`, preserving all other content.
///
/// Mutated fields:
/// - `apiServer.image.{repository,tag}`
/// - `clientServer.image.{repository,tag}`
/// - `clientServer.ingress.{host,namespace}` (`ingress` is created as a
///   mapping when absent)
pub fn apply_images(
    path: &Path,
    api_image: &ImageRef,
    client_image: &ImageRef,
    namespace: &str,
    ingress_host: &str,
) -> DeployResult<()> {
    let raw = fs::read_to_string(path)?;
    let mut doc: Value = serde_yaml::from_str(&raw)?;

    set_image(&mut doc, "apiServer", api_image)?;
    set_image(&mut doc, "clientServer", client_image)?;
    set_ingress(&mut doc, namespace, ingress_host)?;

    fs::write(path, serde_yaml::to_string(&doc)?)?;
    debug!(path = %path.display(), "values file rewritten");
    Ok(())
}

/// Writes repository/tag into `<server_key>.image`. The subtree must
/// already exist; its absence means the chart is incompatible.
fn set_image(doc: &mut Value, server_key: &str, image: &ImageRef) -> DeployResult<()> {
    let image_map = doc
        .get_mut(server_key)
        .and_then(|server| server.get_mut("image"))
        .and_then(Value::as_mapping_mut)
        .ok_or_else(|| DeployError::ChartStructure(format!("{server_key}.image is missing")))?;

    image_map.insert(
        Value::from("repository"),
        Value::from(image.repository.as_str()),
    );
    image_map.insert(Value::from("tag"), Value::from(image.tag.as_str()));
    Ok(())
}

fn set_ingress(doc: &mut Value, namespace: &str, ingress_host: &str) -> DeployResult<()> {
    let client = doc
        .get_mut("clientServer")
        .and_then(Value::as_mapping_mut)
        .ok_or_else(|| DeployError::ChartStructure("clientServer is not a mapping".into()))?;

    let ingress_key = Value::from("ingress");
    // Create the subtree when absent; replace a non-mapping node so the
    // field writes below cannot land on a scalar.
    let needs_fresh = !matches!(client.get(&ingress_key), Some(Value::Mapping(_)));
    if needs_fresh {
        client.insert(ingress_key.clone(), Value::Mapping(Mapping::new()));
    }
    let ingress = client
        .get_mut(&ingress_key)
        .and_then(Value::as_mapping_mut)
        .ok_or_else(|| DeployError::ChartStructure("clientServer.ingress is not a mapping".into()))?;

    ingress.insert(Value::from("host"), Value::from(ingress_host));
    ingress.insert(Value::from("namespace"), Value::from(namespace));
    Ok(())
}
