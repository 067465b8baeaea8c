//! Handle-keyed storage for light descriptors
//!
//! Descriptors are owned by whichever entity created them. Entities keep their
//! descriptors in a [`LightInfoStore`] and hand the registry only the key, so the
//! registry never copies or frees a descriptor.

use slotmap::{new_key_type, SlotMap};

use crate::lighting::LightInfo;

new_key_type! {
    /// Stable key referring to a [`LightInfo`] in a [`LightInfoStore`]
    pub struct LightInfoKey;
}

/// Slot map holding entity-owned light descriptors
pub type LightInfoStore = SlotMap<LightInfoKey, LightInfo>;
