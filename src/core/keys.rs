//! JSON field naming for slots and bindings.
//!
//! Templates and module instances spell the same fields differently on the
//! input side (`input_type`, `input_position`, ...) and the output side
//! (`output_type`, `output_position`, ...). Each generated module provides
//! `serde(with = ...)` helpers for one side.
use serde::{Deserialize, Serialize};

/// A binding's files: one name, or a list of names.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
pub(crate) enum FileNames {
    One(String),
    Many(Vec<String>),
}

impl From<FileNames> for Vec<String> {
    fn from(names: FileNames) -> Self {
        match names {
            FileNames::One(name) => vec![name],
            FileNames::Many(names) => names,
        }
    }
}

macro_rules! keyed_serde {
    (
        $module:ident,
        files = $files:literal,
        kind = $kind:literal,
        file_type = $file_type:literal,
        directory = $directory:literal,
        position = $position:literal,
        prefix = $prefix:literal
    ) => {
        pub(crate) mod $module {
            use serde::de::Error as _;
            use serde::ser::SerializeMap;
            use serde::{Deserialize, Deserializer, Serialize, Serializer};

            use super::FileNames;
            use crate::core::instance::Binding;
            use crate::core::template::{PositionCode, Slot};
            use crate::types::SlotKind;

            #[derive(Serialize, Deserialize)]
            struct SlotRepr {
                #[serde(rename = $kind, default)]
                kind: SlotKind,
                #[serde(rename = $file_type, default)]
                file_type: String,
                #[serde(rename = $position)]
                position: PositionCode,
                #[serde(rename = $prefix, default)]
                prefix: String,
            }

            #[derive(Serialize)]
            struct BindingRef<'a> {
                #[serde(rename = $files)]
                files: &'a [String],
                #[serde(rename = $kind)]
                kind: SlotKind,
                #[serde(rename = $file_type)]
                file_type: &'a str,
                #[serde(rename = $directory)]
                directory: &'a str,
                #[serde(rename = $position)]
                position: PositionCode,
                #[serde(rename = $prefix)]
                prefix: &'a str,
            }

            #[derive(Deserialize)]
            struct BindingRepr {
                #[serde(rename = $files)]
                files: Option<FileNames>,
                #[serde(rename = $kind, default)]
                kind: SlotKind,
                #[serde(rename = $file_type, default)]
                file_type: String,
                #[serde(rename = $directory, default)]
                directory: String,
                #[serde(rename = $position)]
                position: Option<PositionCode>,
                #[serde(rename = $prefix, default)]
                prefix: String,
            }

            impl<'a> From<&'a Binding> for BindingRef<'a> {
                fn from(b: &'a Binding) -> Self {
                    BindingRef {
                        files: &b.files,
                        kind: b.kind,
                        file_type: &b.file_type,
                        directory: &b.directory,
                        position: b.position,
                        prefix: &b.prefix,
                    }
                }
            }

            impl BindingRepr {
                fn is_empty(&self) -> bool {
                    self.files.is_none() && self.position.is_none()
                }

                fn into_binding<E: serde::de::Error>(self) -> Result<Binding, E> {
                    let position = self.position.ok_or_else(|| E::missing_field($position))?;
                    Ok(Binding {
                        files: self.files.map(Vec::from).unwrap_or_default(),
                        kind: self.kind,
                        file_type: self.file_type,
                        directory: self.directory,
                        position,
                        prefix: self.prefix,
                    })
                }
            }

            pub mod slots {
                use super::*;

                pub fn serialize<S: Serializer>(slots: &[Slot], s: S) -> Result<S::Ok, S::Error> {
                    let reprs: Vec<SlotRepr> = slots
                        .iter()
                        .map(|slot| SlotRepr {
                            kind: slot.kind,
                            file_type: slot.file_type.clone(),
                            position: slot.position,
                            prefix: slot.prefix.clone(),
                        })
                        .collect();
                    reprs.serialize(s)
                }

                pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Slot>, D::Error> {
                    let reprs = Vec::<SlotRepr>::deserialize(d)?;
                    Ok(reprs
                        .into_iter()
                        .map(|r| Slot {
                            kind: r.kind,
                            file_type: r.file_type,
                            position: r.position,
                            prefix: r.prefix,
                        })
                        .collect())
                }
            }

            /// An optional binding, written as `{}` when unbound.
            pub mod binding {
                use super::*;

                pub fn serialize<S: Serializer>(
                    binding: &Option<Binding>,
                    s: S,
                ) -> Result<S::Ok, S::Error> {
                    match binding {
                        Some(b) => BindingRef::from(b).serialize(s),
                        None => s.serialize_map(Some(0))?.end(),
                    }
                }

                pub fn deserialize<'de, D: Deserializer<'de>>(
                    d: D,
                ) -> Result<Option<Binding>, D::Error> {
                    let repr = BindingRepr::deserialize(d)?;
                    if repr.is_empty() {
                        return Ok(None);
                    }
                    repr.into_binding().map(Some)
                }
            }

            pub mod bindings {
                use super::*;

                pub fn serialize<S: Serializer>(
                    bindings: &[Binding],
                    s: S,
                ) -> Result<S::Ok, S::Error> {
                    let refs: Vec<BindingRef<'_>> = bindings.iter().map(BindingRef::from).collect();
                    refs.serialize(s)
                }

                pub fn deserialize<'de, D: Deserializer<'de>>(
                    d: D,
                ) -> Result<Vec<Binding>, D::Error> {
                    Vec::<BindingRepr>::deserialize(d)?
                        .into_iter()
                        .map(|r| {
                            if r.is_empty() {
                                Err(D::Error::custom("empty binding in list"))
                            } else {
                                r.into_binding()
                            }
                        })
                        .collect()
                }
            }
        }
    };
}

keyed_serde!(
    input_keys,
    files = "input",
    kind = "input_type",
    file_type = "input_file_type",
    directory = "input_directory",
    position = "input_position",
    prefix = "input_prefix"
);

keyed_serde!(
    output_keys,
    files = "output",
    kind = "output_type",
    file_type = "output_file_type",
    directory = "output_directory",
    position = "output_position",
    prefix = "output_prefix"
);
