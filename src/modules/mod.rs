pub mod books;

use librarian_kernel::ModuleRegistry;

use books::routes::SharedStore;

/// Register all service modules with the registry
pub fn register_all(registry: &mut ModuleRegistry, store: SharedStore) {
    registry.register(books::create_module(store));
}
