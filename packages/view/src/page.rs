// ABOUTME: Page collaborator interface and an in-memory page implementation
// ABOUTME: Render plans and field population only ever touch the page through this trait

use serde::Serialize;
use tracing::debug;

use accessgate_config::constants::{DEFAULT_CONTENT_ID, DEFAULT_LOADING_ID};
use accessgate_core::FormField;

use crate::render::{Banner, RenderInstruction, RenderPlan, StatusView};

/// The two containers every host page must provide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Loading,
    Content,
}

/// Element ids of the page regions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLayout {
    pub loading_id: String,
    pub content_id: String,
}

impl PageLayout {
    pub fn id_of(&self, region: Region) -> &str {
        match region {
            Region::Loading => &self.loading_id,
            Region::Content => &self.content_id,
        }
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            loading_id: DEFAULT_LOADING_ID.to_string(),
            content_id: DEFAULT_CONTENT_ID.to_string(),
        }
    }
}

/// Opaque handle to an input element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ElementRef(pub usize);

/// The host page.
///
/// Missing regions are tolerated by implementations; the gate never creates
/// the containers itself.
#[cfg_attr(test, mockall::automock)]
pub trait Page {
    fn set_region_visible(&mut self, region: Region, visible: bool);

    fn replace_body(&mut self, view: &StatusView);

    /// Insert above everything else without blocking the content below.
    fn insert_banner(&mut self, banner: &Banner);

    fn element_by_id(&self, id: &str) -> Option<ElementRef>;

    fn element_by_name(&self, name: &str) -> Option<ElementRef>;

    fn set_value(&mut self, element: ElementRef, value: &str);

    /// Fire a bubbling `change` notification on the element.
    fn dispatch_change(&mut self, element: ElementRef);
}

/// Apply every instruction of `plan` in order.
pub fn apply_plan<P: Page + ?Sized>(page: &mut P, plan: &RenderPlan) {
    for instruction in plan.iter() {
        debug!(?instruction, "Applying render instruction");
        match instruction {
            RenderInstruction::HideLoading => page.set_region_visible(Region::Loading, false),
            RenderInstruction::ShowContent => page.set_region_visible(Region::Content, true),
            RenderInstruction::HideContent => page.set_region_visible(Region::Content, false),
            RenderInstruction::ReplaceBody(view) => page.replace_body(view),
            RenderInstruction::InsertBanner(banner) => page.insert_banner(banner),
        }
    }
}

/// An input element held by [`MemoryPage`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemoryInput {
    pub id: Option<String>,
    pub name: Option<String>,
    pub value: String,
    pub change_events: u32,
}

/// Page model kept entirely in memory.
///
/// Starts with the loading region visible and the content region hidden,
/// mirroring how host pages are served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemoryPage {
    layout: PageLayout,
    loading_visible: bool,
    content_visible: bool,
    body: Option<StatusView>,
    banners: Vec<Banner>,
    inputs: Vec<MemoryInput>,
}

impl MemoryPage {
    pub fn new(layout: PageLayout) -> Self {
        Self {
            layout,
            loading_visible: true,
            content_visible: false,
            body: None,
            banners: Vec::new(),
            inputs: Vec::new(),
        }
    }

    /// Add an input addressable by id.
    pub fn with_input(mut self, id: &str) -> Self {
        self.inputs.push(MemoryInput {
            id: Some(id.to_string()),
            name: None,
            value: String::new(),
            change_events: 0,
        });
        self
    }

    /// Add one input per known form field, addressed by id.
    pub fn with_known_fields(self) -> Self {
        FormField::ALL
            .iter()
            .fold(self, |page, field| page.with_input(field.element_id()))
    }

    /// Add an input addressable only by its `name` attribute.
    pub fn with_named_input(mut self, name: &str) -> Self {
        self.inputs.push(MemoryInput {
            id: None,
            name: Some(name.to_string()),
            value: String::new(),
            change_events: 0,
        });
        self
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn is_loading_visible(&self) -> bool {
        self.loading_visible
    }

    /// Protected content is only visible while the body is intact.
    pub fn is_content_visible(&self) -> bool {
        self.content_visible && self.body.is_none()
    }

    pub fn body(&self) -> Option<&StatusView> {
        self.body.as_ref()
    }

    pub fn banners(&self) -> &[Banner] {
        &self.banners
    }

    pub fn inputs(&self) -> &[MemoryInput] {
        &self.inputs
    }

    /// Find an input by id first, then by name.
    pub fn input(&self, key: &str) -> Option<&MemoryInput> {
        self.element_by_id(key)
            .or_else(|| self.element_by_name(key))
            .and_then(|element| self.inputs.get(element.0))
    }
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new(PageLayout::default())
    }
}

impl Page for MemoryPage {
    fn set_region_visible(&mut self, region: Region, visible: bool) {
        match region {
            Region::Loading => self.loading_visible = visible,
            Region::Content => self.content_visible = visible,
        }
    }

    fn replace_body(&mut self, view: &StatusView) {
        // Replacing the body drops every region and input along with it
        self.loading_visible = false;
        self.content_visible = false;
        self.banners.clear();
        self.inputs.clear();
        self.body = Some(view.clone());
    }

    fn insert_banner(&mut self, banner: &Banner) {
        self.banners.insert(0, banner.clone());
    }

    fn element_by_id(&self, id: &str) -> Option<ElementRef> {
        self.inputs
            .iter()
            .position(|input| input.id.as_deref() == Some(id))
            .map(ElementRef)
    }

    fn element_by_name(&self, name: &str) -> Option<ElementRef> {
        self.inputs
            .iter()
            .position(|input| input.name.as_deref() == Some(name))
            .map(ElementRef)
    }

    fn set_value(&mut self, element: ElementRef, value: &str) {
        if let Some(input) = self.inputs.get_mut(element.0) {
            input.value = value.to_string();
        }
    }

    fn dispatch_change(&mut self, element: ElementRef) {
        if let Some(input) = self.inputs.get_mut(element.0) {
            input.change_events += 1;
        }
    }
}
