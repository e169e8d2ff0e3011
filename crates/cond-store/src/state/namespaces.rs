// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Conductor Contributors

use cond_core::{Namespace, NamespaceId};

use super::StoreInner;

impl StoreInner {
    pub fn insert_namespace(&mut self, namespace: Namespace) -> NamespaceId {
        let id = namespace.id;
        self.namespaces_by_name.insert(namespace.name.clone(), id);
        self.namespaces.insert(id, namespace);
        id
    }

    pub fn get_namespace(&self, id: NamespaceId) -> Option<&Namespace> {
        self.namespaces.get(&id)
    }

    pub fn get_namespace_mut(&mut self, id: NamespaceId) -> Option<&mut Namespace> {
        self.namespaces.get_mut(&id)
    }

    pub fn get_namespace_by_name(&self, name: &str) -> Option<&Namespace> {
        self.namespaces_by_name.get(name).and_then(|id| self.namespaces.get(id))
    }

    pub fn list_namespaces(&self) -> Vec<&Namespace> {
        self.namespaces.values().collect()
    }

    pub fn remove_namespace(&mut self, id: NamespaceId) -> Option<Namespace> {
        let namespace = self.namespaces.remove(&id)?;
        self.namespaces_by_name.remove(&namespace.name);
        Some(namespace)
    }
}
