use super::color::Color;
use super::table::{ColorAllocError, ColorTable, PixelValue};

/// Instance-scoped hook invoked when a color allocation fails.
///
/// Replaces a process-global error callback: the hook travels with the
/// resolver instance that owns the failing table, and there is no shared
/// mutable state between resolvers.
pub type AllocErrorHook = Box<dyn FnMut(&ColorAllocError)>;

/// Turns channel bytes into a displayable [`Color`].
///
/// Allocation failures are logged and absorbed; callers always get a usable
/// color, carrying the table's fallback pixel. There is deliberately no cache:
/// every call re-allocates, so surfaces with small color tables exhaust
/// exactly as often as the draw-color changes demand.
pub struct ColorResolver {
    table: Box<dyn ColorTable>,
    on_alloc_error: Option<AllocErrorHook>,
}

impl ColorResolver {
    pub fn new(table: Box<dyn ColorTable>) -> Self {
        Self {
            table,
            on_alloc_error: None,
        }
    }

    /// Like [`new`](Self::new), with a hook observing allocation failures.
    pub fn with_error_hook(table: Box<dyn ColorTable>, hook: AllocErrorHook) -> Self {
        Self {
            table,
            on_alloc_error: Some(hook),
        }
    }

    /// Resolves channel bytes to a color with a displayable pixel value.
    ///
    /// On allocation failure the table's fallback pixel is attached instead;
    /// the failure is logged and reported to the hook, never returned.
    pub fn resolve(&mut self, r: u8, g: u8, b: u8, a: u8) -> Color {
        let pixel = match self.table.allocate(r, g, b) {
            Ok(pixel) => pixel,
            Err(err) => {
                log::warn!("{err}; using the fallback pixel");
                if let Some(hook) = self.on_alloc_error.as_mut() {
                    hook(&err);
                }
                self.table.fallback_pixel()
            }
        };

        Color { r, g, b, a, pixel }
    }

    pub fn fallback_pixel(&self) -> PixelValue {
        self.table.fallback_pixel()
    }
}
