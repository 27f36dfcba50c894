//! Scopes and the reserved `LANG_*` bindings.
//!
//! The interpreter keeps a flat table of [`Scope`]s addressed by
//! [`ScopeId`](lang_value::ScopeId); a user function runs one level above its
//! caller with a snapshot of the caller's bindings (copy-down scoping).
//!
//! The reserved constants are identical for every scope that runs the same
//! script file, and final, so one [`ReservedBindings`] table is shared by all
//! those scopes instead of being copied into each of them. `$LANG_ERRNO` is
//! the exception: every scope has its own errno cell.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use lang_value::{DataObject, InterpretingError, Slot};
use rustc_hash::FxHashMap;

use crate::random::LANG_RAND_MAX;

/// Name of the per-scope errno cell.
pub const ERRNO_VARIABLE: &str = "$LANG_ERRNO";

/// Version reported by `$LANG_VERSION`.
pub const LANG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// `$LANG_*`, `&LANG_*` and `fp.LANG_*` names are reserved.
pub fn is_reserved_name(name: &str) -> bool {
    ["$", "&", "fp."]
        .iter()
        .filter_map(|sigil| name.strip_prefix(sigil))
        .any(|rest| rest.starts_with("LANG_"))
}

/// The script a set of reserved bindings describes.
#[derive(Clone, Debug, Default)]
pub struct ScriptInfo {
    /// Directory of the script, `$LANG_PATH`. Links resolve against it.
    pub directory: PathBuf,
    /// File name of the script, `$LANG_FILE`.
    pub file: String,
    /// Program arguments, `&LANG_ARGS`.
    pub arguments: Arc<[String]>,
}

impl ScriptInfo {
    /// Info for the script at `path`, keeping the arguments.
    #[must_use]
    pub fn for_file(&self, path: &Path) -> ScriptInfo {
        ScriptInfo {
            directory: path.parent().map(Path::to_path_buf).unwrap_or_default(),
            file: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            arguments: Arc::clone(&self.arguments),
        }
    }
}

/// The final `LANG_*` constants of one script.
pub struct ReservedBindings {
    info: ScriptInfo,
    slots: FxHashMap<Arc<str>, Slot>,
}

impl ReservedBindings {
    pub fn new(info: ScriptInfo) -> Self {
        let mut slots = FxHashMap::default();
        let mut bind = |name: &str, value: DataObject| {
            let name: Arc<str> = Arc::from(name);
            let value = value.with_variable_name(Arc::clone(&name)).into_final();
            slots.insert(name, Slot::new(value));
        };

        bind("$LANG_VERSION", DataObject::text(LANG_VERSION));
        bind(
            "$LANG_PATH",
            DataObject::text(info.directory.to_string_lossy().into_owned()),
        );
        bind("$LANG_FILE", DataObject::text(info.file.as_str()));
        bind("$LANG_RAND_MAX", DataObject::int(LANG_RAND_MAX));
        bind("$LANG_OS_NAME", DataObject::text(std::env::consts::OS));
        bind("$LANG_OS_ARCH", DataObject::text(std::env::consts::ARCH));
        bind("$LANG_OS_FAMILY", DataObject::text(std::env::consts::FAMILY));
        bind("$LANG_INT_MIN", DataObject::int(i32::MIN));
        bind("$LANG_INT_MAX", DataObject::int(i32::MAX));
        bind("$LANG_LONG_MIN", DataObject::long(i64::MIN));
        bind("$LANG_LONG_MAX", DataObject::long(i64::MAX));
        bind("$LANG_FLOAT_NAN", DataObject::float(f32::NAN));
        bind("$LANG_FLOAT_POS_INF", DataObject::float(f32::INFINITY));
        bind("$LANG_FLOAT_NEG_INF", DataObject::float(f32::NEG_INFINITY));
        bind("$LANG_DOUBLE_NAN", DataObject::double(f64::NAN));
        bind("$LANG_DOUBLE_POS_INF", DataObject::double(f64::INFINITY));
        bind("$LANG_DOUBLE_NEG_INF", DataObject::double(f64::NEG_INFINITY));
        bind("$LANG_MATH_PI", DataObject::double(std::f64::consts::PI));
        bind("$LANG_MATH_E", DataObject::double(std::f64::consts::E));

        let arguments = DataObject::array(
            info.arguments
                .iter()
                .map(|argument| DataObject::text(argument.as_str()))
                .collect(),
        );
        if let Some(array) = arguments.as_array() {
            array.make_elements_final();
        }
        bind("&LANG_ARGS", arguments);

        for error in InterpretingError::ALL {
            bind(
                &format!("$LANG_ERROR_{}", error.name()),
                DataObject::error(error),
            );
            bind(
                &format!("$LANG_ERRNO_{}", error.name()),
                DataObject::int(error.code()),
            );
        }

        ReservedBindings { info, slots }
    }

    pub fn info(&self) -> &ScriptInfo {
        &self.info
    }

    pub fn get(&self, name: &str) -> Option<&Slot> {
        self.slots.get(name)
    }
}

/// A `func.copyAfterFP` request: copy callee `from` into caller `to` when the
/// call returns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriteBack {
    pub to: String,
    pub from: String,
}

/// Variables, translations and errno of one scope.
pub struct Scope {
    reserved: Arc<ReservedBindings>,
    variables: FxHashMap<Arc<str>, Slot>,
    translations: FxHashMap<String, String>,
    errno: InterpretingError,
    write_backs: Vec<WriteBack>,
}

impl Scope {
    pub fn new(reserved: Arc<ReservedBindings>) -> Self {
        Scope {
            reserved,
            variables: FxHashMap::default(),
            translations: FxHashMap::default(),
            errno: InterpretingError::NoError,
            write_backs: Vec::new(),
        }
    }

    /// Scope for a user function called from `self`: every binding is copied
    /// into a fresh slot, so reassignment in the callee does not reach the
    /// caller while shared arrays still do.
    pub fn copy_down(&self) -> Scope {
        Scope {
            reserved: Arc::clone(&self.reserved),
            variables: self
                .variables
                .iter()
                .map(|(name, slot)| (Arc::clone(name), Slot::new(slot.get())))
                .collect(),
            translations: self.translations.clone(),
            errno: InterpretingError::NoError,
            write_backs: Vec::new(),
        }
    }

    pub fn reserved(&self) -> &Arc<ReservedBindings> {
        &self.reserved
    }

    /// Slot bound to `name`, reserved bindings first.
    pub fn slot(&self, name: &str) -> Option<&Slot> {
        self.reserved
            .get(name)
            .or_else(|| self.variables.get(name))
    }

    /// Whether `name` resolves in this scope (including `$LANG_ERRNO`).
    pub fn contains(&self, name: &str) -> bool {
        name == ERRNO_VARIABLE || self.slot(name).is_some()
    }

    /// Bind `name` to a new slot holding `value`.
    pub fn define(&mut self, name: &str, value: DataObject) -> Slot {
        let name: Arc<str> = Arc::from(name);
        let slot = Slot::new(value.with_variable_name(Arc::clone(&name)));
        self.variables.insert(name, slot.clone());
        slot
    }

    /// Non-reserved variables, for `linker.bindLibrary`.
    pub fn variables(&self) -> impl Iterator<Item = (&str, &Slot)> {
        self.variables.iter().map(|(name, slot)| (&**name, slot))
    }

    pub fn translation(&self, key: &str) -> Option<&str> {
        self.translations.get(key).map(String::as_str)
    }

    pub fn set_translation(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.translations.insert(key.into(), value.into());
    }

    pub fn translations(&self) -> impl Iterator<Item = (&str, &str)> {
        self.translations
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn errno(&self) -> InterpretingError {
        self.errno
    }

    /// Errors (code >= 0) always overwrite; warnings only while no error is
    /// pending.
    pub fn set_errno(&mut self, error: InterpretingError) {
        if !error.is_warning() || self.errno.code() < 1 {
            self.errno = error;
        }
    }

    /// Read and clear the errno cell.
    pub fn take_errno(&mut self) -> InterpretingError {
        std::mem::replace(&mut self.errno, InterpretingError::NoError)
    }

    pub fn push_write_back(&mut self, write_back: WriteBack) {
        self.write_backs.push(write_back);
    }

    pub fn take_write_backs(&mut self) -> Vec<WriteBack> {
        std::mem::take(&mut self.write_backs)
    }
}

#[cfg(test)]
mod tests;
