//! Running other script files: `linker.link`, `linker.bindLibrary` and
//! `linker.include`.

use std::sync::Arc;

use lang_value::{DataObject, ErrorObject, InterpretingError, LinkMode, ScopeId, Slot};
use tracing::debug;

use super::Interpreter;
use crate::environment::{is_reserved_name, ReservedBindings, Scope};
use crate::source::normalize_path;
use crate::{ControlAction, EvalResult};

/// Nested links allowed before `TO_MANY_INNER_LINKS`.
pub const MAX_LINK_DEPTH: usize = 64;

impl Interpreter {
    /// Load `path` relative to the `$LANG_PATH` of `scope` and run it.
    pub(crate) fn link_script(
        &mut self,
        path: &str,
        mode: LinkMode,
        scope: ScopeId,
    ) -> Option<DataObject> {
        if self.link_depth >= MAX_LINK_DEPTH {
            return Some(self.raise_error(InterpretingError::ToManyInnerLinks, Some(path), scope));
        }
        if !path.ends_with(".lang") {
            return Some(self.raise_error(InterpretingError::NoLangFile, Some(path), scope));
        }
        let info = self.scopes.get(scope.index())?.reserved().info().clone();
        let full_path = normalize_path(&info.directory.join(path));
        let Some(source) = self.loader.load(&full_path) else {
            let shown = full_path.display().to_string();
            return Some(self.raise_error(InterpretingError::FileNotFound, Some(&shown), scope));
        };
        debug!(path = %full_path.display(), ?mode, depth = self.link_depth, "linking script");
        let nodes = lang_parse::parse(&source);

        self.link_depth += 1;
        let result = match mode {
            LinkMode::Include => self.execute_block(&nodes, scope),
            LinkMode::Link | LinkMode::BindLibrary => {
                let target = scope.child();
                let reserved = Arc::new(ReservedBindings::new(info.for_file(&full_path)));
                self.scopes.truncate(target.index());
                self.scopes.push(Scope::new(reserved));
                let result = self.execute_block(&nodes, target);
                self.scopes.truncate(target.index() + 1);
                if let Some(linked) = self.scopes.pop() {
                    self.merge_linked_scope(&linked, mode, scope);
                }
                result
            }
        };
        self.link_depth -= 1;

        self.finish_link(result, mode, scope)
    }

    /// Copy translations (and for libraries, variables) back into the
    /// linking scope.
    fn merge_linked_scope(&mut self, linked: &Scope, mode: LinkMode, scope: ScopeId) {
        let target = self.scope_mut(scope);
        for (key, value) in linked.translations() {
            target.set_translation(key, value);
        }
        if mode != LinkMode::BindLibrary {
            return;
        }
        let variables: Vec<(String, DataObject)> = linked
            .variables()
            .filter(|(name, _)| !is_reserved_name(name))
            .map(|(name, slot): (&str, &Slot)| (name.to_string(), slot.get()))
            .collect();
        for (name, value) in variables {
            let is_final = value.is_final();
            self.assign_variable(&name, value, scope);
            if is_final {
                if let Some(slot) = self.scope(scope).slot(&name) {
                    slot.update(|value| {
                        value.make_final();
                    });
                }
            }
        }
    }

    fn finish_link(
        &mut self,
        result: EvalResult,
        mode: LinkMode,
        scope: ScopeId,
    ) -> Option<DataObject> {
        match result {
            Ok(_) | Err(ControlAction::Break(_) | ControlAction::Continue(_)) => None,
            Err(ControlAction::Return(value)) => value,
            Err(ControlAction::Throw(error)) => {
                // An included script throws at the call site.
                if mode == LinkMode::Include || self.throw_propagates(scope) {
                    self.pending = Some(ControlAction::Throw(error));
                    return None;
                }
                if let Some(kind) = error.as_error().map(ErrorObject::kind) {
                    self.stamp_errno(kind, scope);
                }
                Some(error)
            }
            Err(ControlAction::Stop) => {
                self.pending = Some(ControlAction::Stop);
                None
            }
        }
    }
}
