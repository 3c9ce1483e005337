//! Resource handle and the resolver capability.

/// A node in the content tree, as handed out by a resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub path: String,
    pub name: String,
    /// Value of `sling:resourceSuperType`, if the node declares one.
    pub resource_super_type: Option<String>,
}

impl Resource {
    pub fn new(path: impl Into<String>, resource_super_type: Option<String>) -> Self {
        let path = path.into();
        let name = path.rsplit('/').next().unwrap_or_default().to_string();
        Self {
            path,
            name,
            resource_super_type,
        }
    }
}

/// Read access to a content tree.
///
/// Absence is never an error: a missing node is `None` and a leaf has no
/// children.
pub trait ResourceResolver {
    fn get_resource(&self, path: &str) -> Option<Resource>;

    /// Children of `resource` in repository order.
    fn list_children(&self, resource: &Resource) -> Vec<Resource>;
}

impl<R: ResourceResolver + ?Sized> ResourceResolver for &R {
    fn get_resource(&self, path: &str) -> Option<Resource> {
        (**self).get_resource(path)
    }

    fn list_children(&self, resource: &Resource) -> Vec<Resource> {
        (**self).list_children(resource)
    }
}

/// Picks the privileged service resolver when one is configured, otherwise
/// the resolver of the current request.
pub struct FallbackResolver<'a> {
    privileged: Option<&'a dyn ResourceResolver>,
    request: &'a dyn ResourceResolver,
}

impl<'a> FallbackResolver<'a> {
    pub fn new(
        privileged: Option<&'a dyn ResourceResolver>,
        request: &'a dyn ResourceResolver,
    ) -> Self {
        Self {
            privileged,
            request,
        }
    }

    fn active(&self) -> &'a dyn ResourceResolver {
        self.privileged.unwrap_or(self.request)
    }
}

impl ResourceResolver for FallbackResolver<'_> {
    fn get_resource(&self, path: &str) -> Option<Resource> {
        self.active().get_resource(path)
    }

    fn list_children(&self, resource: &Resource) -> Vec<Resource> {
        self.active().list_children(resource)
    }
}
