//! Storage layout manifest and upgrade compatibility check.
//!
//! Each logic version compiles in `CURRENT_LAYOUT`, the ordered list of
//! storage namespaces it reads and writes together with the type stored
//! there. The manifest of the installed logic is persisted; `migrate` only
//! accepts new logic whose manifest starts with the persisted one, slot for
//! slot, and whose extra slots use namespaces never seen before.
//!
//! A slot is identified by its type tag and by a fingerprint of the stored
//! value's JSON schema, so retyping a field inside a stored struct is caught
//! even when the tag stays the same.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{to_json_vec, Addr, Storage, Uint128};
use schemars::schema::{RootSchema, Schema, SchemaObject, SubschemaValidation};
use schemars::visit::{visit_schema_object, Visitor};
use schemars::JsonSchema;

use crate::error::ContractError;
use crate::fee_manager::FeeConfig;
use crate::hash::keccak256;
use crate::state::{
    ClaimRecord, Config, LogicInfo, PendingOwner, PendingUpgrade, SettlementRoot, Stats,
    NS_CLAIM_BITMAP, NS_CLAIM_RECORDS, NS_CONFIG, NS_CONTRACT_INFO, NS_CUSTODY, NS_EPOCHS,
    NS_FEE_CONFIG, NS_LATEST_EPOCH, NS_LOGIC_INFO, NS_NORMAL_ADMINS, NS_OWNER, NS_PENDING_OWNER,
    NS_PENDING_UPGRADE, NS_STATS, NS_STORAGE_LAYOUT, NS_SUPER_ADMINS, STORAGE_LAYOUT,
};

/// A compiled-in storage slot declaration.
#[derive(Clone, Copy, Debug)]
pub struct SlotSpec {
    pub namespace: &'static str,
    pub type_tag: &'static str,
    /// Schema of the value stored under the namespace
    pub schema: fn() -> RootSchema,
}

pub const fn slot(
    namespace: &'static str,
    type_tag: &'static str,
    schema: fn() -> RootSchema,
) -> SlotSpec {
    SlotSpec {
        namespace,
        type_tag,
        schema,
    }
}

/// JSON schema of `T`, usable as a `SlotSpec::schema`.
pub fn schema_of<T: JsonSchema>() -> RootSchema {
    schemars::schema_for!(T)
}

/// Drops titles, descriptions and other annotations from a schema.
#[derive(Clone, Debug)]
struct StripMetadata;

impl Visitor for StripMetadata {
    fn visit_schema_object(&mut self, schema: &mut SchemaObject) {
        schema.metadata = None;
        visit_schema_object(self, schema);
        if let Some(inner) = annotated_reference(schema) {
            *schema = inner;
        }
    }
}

/// `{"allOf": [X]}` is how a documented `$ref` field is written; yields `X`.
fn annotated_reference(schema: &SchemaObject) -> Option<SchemaObject> {
    let subschemas = schema.subschemas.as_deref()?;
    let inner = match subschemas.all_of.as_deref() {
        Some([Schema::Object(inner)]) => inner.clone(),
        _ => return None,
    };
    let bare = SchemaObject {
        subschemas: Some(Box::new(SubschemaValidation {
            all_of: Some(vec![Schema::Object(inner.clone())]),
            ..Default::default()
        })),
        ..Default::default()
    };
    (*schema == bare).then_some(inner)
}

/// Short keccak fingerprint of a schema's structure.
///
/// Doc comments do not affect the result; field names and types do.
pub fn schema_fingerprint(schema: fn() -> RootSchema) -> Result<String, ContractError> {
    let mut root = schema();
    StripMetadata.visit_root_schema(&mut root);
    let hash = keccak256(&to_json_vec(&root)?);
    Ok(hex::encode(&hash[..8]))
}

/// A persisted storage slot declaration.
#[cw_serde]
pub struct LayoutSlot {
    pub namespace: String,
    pub type_tag: String,
    pub schema_hash: String,
}

impl LayoutSlot {
    pub fn from_spec(spec: &SlotSpec) -> Result<Self, ContractError> {
        Ok(Self {
            namespace: spec.namespace.to_string(),
            type_tag: spec.type_tag.to_string(),
            schema_hash: schema_fingerprint(spec.schema)?,
        })
    }
}

/// Storage layout of this logic version. Append new slots at the end only.
pub const CURRENT_LAYOUT: &[SlotSpec] = &[
    slot(
        NS_CONTRACT_INFO,
        "Item<cw2::ContractVersion>",
        schema_of::<cw2::ContractVersion>,
    ),
    slot(
        NS_STORAGE_LAYOUT,
        "Item<Vec<LayoutSlot>>",
        schema_of::<Vec<LayoutSlot>>,
    ),
    slot(NS_LOGIC_INFO, "Item<LogicInfo>", schema_of::<LogicInfo>),
    slot(
        NS_PENDING_UPGRADE,
        "Item<PendingUpgrade>",
        schema_of::<PendingUpgrade>,
    ),
    slot(NS_CONFIG, "Item<Config>", schema_of::<Config>),
    slot(NS_OWNER, "Item<Addr>", schema_of::<Addr>),
    slot(
        NS_PENDING_OWNER,
        "Item<PendingOwner>",
        schema_of::<PendingOwner>,
    ),
    slot(NS_SUPER_ADMINS, "Map<&Addr,bool>", schema_of::<bool>),
    slot(NS_NORMAL_ADMINS, "Map<&Addr,bool>", schema_of::<bool>),
    slot(NS_FEE_CONFIG, "Item<FeeConfig>", schema_of::<FeeConfig>),
    slot(
        NS_EPOCHS,
        "Map<u64,SettlementRoot>",
        schema_of::<SettlementRoot>,
    ),
    slot(NS_LATEST_EPOCH, "Item<u64>", schema_of::<u64>),
    slot(NS_CLAIM_BITMAP, "Map<(u64,u32),u64>", schema_of::<u64>),
    slot(
        NS_CLAIM_RECORDS,
        "Map<(u64,u32),ClaimRecord>",
        schema_of::<ClaimRecord>,
    ),
    slot(NS_CUSTODY, "Map<&str,Uint128>", schema_of::<Uint128>),
    slot(NS_STATS, "Item<Stats>", schema_of::<Stats>),
];

/// Convert a compiled manifest into its persisted form.
pub fn to_layout(specs: &[SlotSpec]) -> Result<Vec<LayoutSlot>, ContractError> {
    specs.iter().map(LayoutSlot::from_spec).collect()
}

/// Check that `next` can take over storage written under `installed`.
pub fn check_compatible(installed: &[LayoutSlot], next: &[LayoutSlot]) -> Result<(), ContractError> {
    if next.len() < installed.len() {
        return Err(ContractError::IncompatibleLayout {
            reason: format!(
                "new layout drops slots: {} installed, {} declared",
                installed.len(),
                next.len()
            ),
        });
    }

    for (position, (old, new)) in installed.iter().zip(next.iter()).enumerate() {
        if old.namespace != new.namespace {
            return Err(ContractError::IncompatibleLayout {
                reason: format!(
                    "slot {} reordered: expected '{}', found '{}'",
                    position, old.namespace, new.namespace
                ),
            });
        }
        if old.type_tag != new.type_tag {
            return Err(ContractError::IncompatibleLayout {
                reason: format!(
                    "slot '{}' retyped: {} -> {}",
                    old.namespace, old.type_tag, new.type_tag
                ),
            });
        }
        if old.schema_hash != new.schema_hash {
            return Err(ContractError::IncompatibleLayout {
                reason: format!(
                    "slot '{}' retyped: {} schema {} -> {}",
                    old.namespace, old.type_tag, old.schema_hash, new.schema_hash
                ),
            });
        }
    }

    let mut seen: Vec<&str> = installed.iter().map(|s| s.namespace.as_str()).collect();
    for appended in &next[installed.len()..] {
        if seen.contains(&appended.namespace.as_str()) {
            return Err(ContractError::IncompatibleLayout {
                reason: format!("namespace '{}' reused", appended.namespace),
            });
        }
        seen.push(appended.namespace.as_str());
    }

    Ok(())
}

/// Persist `specs` as the installed layout.
pub fn record_layout(storage: &mut dyn Storage, specs: &[SlotSpec]) -> Result<(), ContractError> {
    let next = to_layout(specs)?;
    check_compatible(&[], &next)?;
    STORAGE_LAYOUT.save(storage, &next)?;
    Ok(())
}

/// Validate `specs` against the persisted layout and install it.
pub fn upgrade_layout(storage: &mut dyn Storage, specs: &[SlotSpec]) -> Result<(), ContractError> {
    let installed = STORAGE_LAYOUT.load(storage)?;
    let next = to_layout(specs)?;
    check_compatible(&installed, &next)?;
    STORAGE_LAYOUT.save(storage, &next)?;
    Ok(())
}
