#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Position,
    Velocity,
    Collider,
    Health,
    Attack,
    Item,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Ember,
    Salve,
    Quicken,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Component {
    Position {
        x: f32,
        y: f32,
    },
    Velocity {
        x: f32,
        y: f32,
    },
    Collider {
        radius: f32,
    },
    Health {
        current: f32,
        max: f32,
        regeneration: f32,
    },
    Attack {
        damage: f32,
        range: f32,
        cooldown_seconds: f32,
        cooldown_remaining: f32,
    },
    Item {
        kind: ItemKind,
        value: f32,
        duration_seconds: f32,
    },
}

impl Component {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Position { .. } => ComponentKind::Position,
            Component::Velocity { .. } => ComponentKind::Velocity,
            Component::Collider { .. } => ComponentKind::Collider,
            Component::Health { .. } => ComponentKind::Health,
            Component::Attack { .. } => ComponentKind::Attack,
            Component::Item { .. } => ComponentKind::Item,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Entity {
    id: EntityId,
    active: bool,
    components: Vec<Component>,
}

impl Entity {
    fn new(id: EntityId) -> Self {
        Self {
            id,
            active: true,
            components: Vec::new(),
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Attaches a component; a component of the same kind is overwritten
    /// (last write wins).
    pub fn add_component(&mut self, component: Component) {
        let kind = component.kind();
        match self.components.iter_mut().find(|c| c.kind() == kind) {
            Some(existing) => *existing = component,
            None => self.components.push(component),
        }
    }

    /// Missing components are not errors; callers must handle `None`.
    pub fn component(&self, kind: ComponentKind) -> Option<&Component> {
        self.components.iter().find(|c| c.kind() == kind)
    }

    pub fn component_mut(&mut self, kind: ComponentKind) -> Option<&mut Component> {
        self.components.iter_mut().find(|c| c.kind() == kind)
    }

    pub fn has_all(&self, kinds: &[ComponentKind]) -> bool {
        kinds.iter().all(|kind| self.component(*kind).is_some())
    }

    pub fn position(&self) -> Option<(f32, f32)> {
        match self.component(ComponentKind::Position) {
            Some(Component::Position { x, y }) => Some((*x, *y)),
            _ => None,
        }
    }
}

/// Entity store for one scene. Spawns and despawns requested while systems
/// iterate are queued and committed between system passes, so every system
/// sees a stable entity set for the duration of its own pass.
#[derive(Debug, Default)]
pub struct EntityWorld {
    next_id: u64,
    entities: Vec<Entity>,
    pending_spawns: Vec<Entity>,
    pending_despawns: Vec<EntityId>,
}

impl EntityWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, components: Vec<Component>) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        let mut entity = Entity::new(id);
        for component in components {
            entity.add_component(component);
        }
        self.pending_spawns.push(entity);
        id
    }

    pub fn despawn(&mut self, id: EntityId) -> bool {
        let live = self.entities.iter().any(|entity| entity.id == id);
        let pending = self.pending_spawns.iter().any(|entity| entity.id == id);
        if !live && !pending {
            return false;
        }
        self.pending_despawns.push(id);
        true
    }

    pub fn apply_pending(&mut self) {
        if !self.pending_despawns.is_empty() {
            self.pending_despawns.sort_by_key(|id| id.0);
            self.pending_despawns.dedup();
            let pending = &self.pending_despawns;
            self.entities.retain(|entity| {
                pending
                    .binary_search_by_key(&entity.id.0, |id| id.0)
                    .is_err()
            });
            self.pending_spawns.retain(|entity| {
                pending
                    .binary_search_by_key(&entity.id.0, |id| id.0)
                    .is_err()
            });
            self.pending_despawns.clear();
        }

        self.entities.append(&mut self.pending_spawns);
    }

    pub fn clear(&mut self) {
        self.entities.clear();
        self.pending_spawns.clear();
        self.pending_despawns.clear();
        self.next_id = 0;
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.id == id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|entity| entity.id == id)
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn set_active(&mut self, id: EntityId, active: bool) {
        if let Some(entity) = self.entity_mut(id) {
            entity.set_active(active);
        }
    }

    /// Ids of active entities carrying all required component kinds, in
    /// spawn order. This is the per-pass snapshot systems iterate.
    pub fn matching_ids(&self, required: &[ComponentKind]) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|entity| entity.active && entity.has_all(required))
            .map(|entity| entity.id)
            .collect()
    }
}

pub trait GameSystem {
    fn name(&self) -> &'static str;
    fn required_components(&self) -> &'static [ComponentKind];
    fn run(&mut self, dt_seconds: f32, world: &mut EntityWorld, matching: &[EntityId]);
}

/// Runs systems in registration order. Each system gets a snapshot of the
/// entities matching its filter at the start of its pass; pending spawns and
/// despawns are committed after each pass, never mid-pass.
#[derive(Default)]
pub struct SystemSchedule {
    systems: Vec<Box<dyn GameSystem>>,
}

impl SystemSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, system: Box<dyn GameSystem>) {
        self.systems.push(system);
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    pub fn clear(&mut self) {
        self.systems.clear();
    }

    pub fn run(&mut self, dt_seconds: f32, world: &mut EntityWorld) {
        for system in &mut self.systems {
            let matching = world.matching_ids(system.required_components());
            system.run(dt_seconds, world, &matching);
            world.apply_pending();
        }
    }
}

impl std::fmt::Debug for SystemSchedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.systems.iter().map(|system| system.name()).collect();
        f.debug_struct("SystemSchedule")
            .field("systems", &names)
            .finish()
    }
}
