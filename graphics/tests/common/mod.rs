//! Shared test fixtures: a recording allocator and driver.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use firethorn_graphics::{
    Driver, RenderTargetAllocation, RenderTargetId, ResourceAllocator, TargetFlags,
    TextureDescriptor, TextureId, TextureUsage,
};

/// Everything observable that happens during a frame, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    CreateTexture {
        name: String,
        usage: TextureUsage,
    },
    DestroyTexture {
        name: String,
    },
    CreateRenderTarget {
        pass: String,
        discard_start: TargetFlags,
        discard_end: TargetFlags,
    },
    DestroyRenderTarget {
        pass: String,
    },
    /// Pushed by pass callbacks themselves.
    PassExecuted {
        name: String,
    },
}

/// Shared, ordered event log. Clone freely; all clones append to the same
/// sequence.
#[derive(Debug, Clone, Default)]
pub struct EventLog(Rc<RefCell<Vec<Event>>>);

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn pass_executed(&self, name: &str) {
        self.push(Event::PassExecuted {
            name: name.to_string(),
        });
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    pub fn executed_passes(&self) -> Vec<String> {
        self.0
            .borrow()
            .iter()
            .filter_map(|event| match event {
                Event::PassExecuted { name } => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn created_textures(&self) -> Vec<String> {
        self.0
            .borrow()
            .iter()
            .filter_map(|event| match event {
                Event::CreateTexture { name, .. } => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn destroyed_textures(&self) -> Vec<String> {
        self.0
            .borrow()
            .iter()
            .filter_map(|event| match event {
                Event::DestroyTexture { name } => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn texture_usage(&self, name: &str) -> Option<TextureUsage> {
        self.0.borrow().iter().find_map(|event| match event {
            Event::CreateTexture { name: n, usage } if n == name => Some(*usage),
            _ => None,
        })
    }

    pub fn render_targets(&self) -> Vec<(String, TargetFlags, TargetFlags)> {
        self.0
            .borrow()
            .iter()
            .filter_map(|event| match event {
                Event::CreateRenderTarget {
                    pass,
                    discard_start,
                    discard_end,
                } => Some((pass.clone(), *discard_start, *discard_end)),
                _ => None,
            })
            .collect()
    }

    /// Position of the first matching event, for ordering assertions.
    pub fn position(&self, predicate: impl Fn(&Event) -> bool) -> Option<usize> {
        self.0.borrow().iter().position(predicate)
    }
}

/// Allocator that records every create/destroy into an [`EventLog`].
pub struct MockAllocator {
    next_id: u32,
    texture_names: HashMap<u32, String>,
    target_passes: HashMap<u32, String>,
    log: EventLog,
}

impl MockAllocator {
    pub fn new(log: EventLog) -> Self {
        Self {
            next_id: 0,
            texture_names: HashMap::new(),
            target_passes: HashMap::new(),
            log,
        }
    }
}

impl ResourceAllocator for MockAllocator {
    fn create_texture(
        &mut self,
        name: &str,
        _descriptor: &TextureDescriptor,
        usage: TextureUsage,
    ) -> TextureId {
        self.next_id += 1;
        self.texture_names.insert(self.next_id, name.to_string());
        self.log.push(Event::CreateTexture {
            name: name.to_string(),
            usage,
        });
        TextureId::new(self.next_id)
    }

    fn destroy_texture(&mut self, texture: TextureId) {
        let name = self
            .texture_names
            .remove(&texture.raw())
            .expect("destroying a texture that was never created");
        self.log.push(Event::DestroyTexture { name });
    }

    fn create_render_target(
        &mut self,
        name: &str,
        allocation: &RenderTargetAllocation,
    ) -> RenderTargetId {
        self.next_id += 1;
        self.target_passes.insert(self.next_id, name.to_string());
        self.log.push(Event::CreateRenderTarget {
            pass: name.to_string(),
            discard_start: allocation.discard_start,
            discard_end: allocation.discard_end,
        });
        RenderTargetId::new(self.next_id)
    }

    fn destroy_render_target(&mut self, target: RenderTargetId) {
        let pass = self
            .target_passes
            .remove(&target.raw())
            .expect("destroying a render target that was never created");
        self.log.push(Event::DestroyRenderTarget { pass });
    }
}

/// Driver that records group markers and flushes.
#[derive(Debug, Default)]
pub struct MockDriver {
    pub markers: Vec<String>,
    depth: u32,
    flushes: u32,
}

impl MockDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn marker_depth(&self) -> u32 {
        self.depth
    }

    pub fn flushes(&self) -> u32 {
        self.flushes
    }
}

impl Driver for MockDriver {
    fn push_group_marker(&mut self, name: &str) {
        self.depth += 1;
        self.markers.push(name.to_string());
    }

    fn pop_group_marker(&mut self) {
        assert!(self.depth > 0, "pop_group_marker without matching push");
        self.depth -= 1;
    }

    fn flush(&mut self) {
        self.flushes += 1;
    }
}
