// ABOUTME: Presentation layer for AccessGate
// ABOUTME: Display state machine, pure render plans, page collaborator trait, and field population

pub mod page;
pub mod populate;
pub mod render;
pub mod state;

// Re-export main types
pub use page::{apply_plan, ElementRef, MemoryInput, MemoryPage, Page, PageLayout, Region};
pub use populate::{populate_fields, PopulateReport};
pub use render::{format_date, render, Banner, Link, Links, RenderInstruction, RenderPlan, StatusView};
pub use state::{DisplayState, ExpiryWarning, PresentationController};
