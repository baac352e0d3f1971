// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use serde_json::Value;

/// Snake-case keys written by the older Python backend, mapped to store names.
const LEGACY_KEYS: &[(&str, &str)] = &[
    ("ai_provider", "aiProvider"),
    ("api_key", "aiApiKey"),
    ("default_ai_model", "aiModel"),
    ("auto_refresh_interval", "refreshInterval"),
];

/// Rename legacy keys unless the current key is already present.
pub(super) fn migrate_on_load(value: Value) -> Value {
    match value {
        Value::Object(mut map) => {
            for (legacy, current) in LEGACY_KEYS {
                if let Some(legacy_value) = map.remove(*legacy) {
                    map.entry(current.to_string()).or_insert(legacy_value);
                }
            }
            Value::Object(map)
        }
        other => other,
    }
}

/// Deep-merge two JSON values.
/// `base` is existing file content, `overlay` is serialized current struct.
/// Overlay values take priority.
pub(super) fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_val) in overlay_map {
                let merged = if let Some(base_val) = base_map.remove(&key) {
                    deep_merge(base_val, overlay_val)
                } else {
                    overlay_val
                };
                base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }
        (_base, overlay) => overlay,
    }
}
