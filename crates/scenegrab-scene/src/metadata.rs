use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Bool(bool),
    Integer(i64),
    Number(f64),
    Text(String),
}

/// Per-node bag owned by the host application. The drag core never reads or
/// writes it.
pub type Metadata = BTreeMap<String, MetaValue>;
