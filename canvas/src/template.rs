//! Static room-template catalog.
//!
//! Templates are hardcoded: an id, a display name, optional style metadata,
//! and a room list with placeholder colours. Selecting a template clears all
//! wall/line state and swaps the background image reference; the first room
//! entry becomes the active room.

#[cfg(test)]
#[path = "template_test.rs"]
mod template_test;

/// One room entry within a template.
#[derive(Debug, Clone, Copy)]
pub struct TemplateRoom {
    pub name: &'static str,
    /// Hex colour (no `#`) used for placeholder imagery.
    pub placeholder_color: &'static str,
    pub text: &'static str,
}

/// A room-category template from the static catalog.
#[derive(Debug, Clone, Copy)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub color: &'static str,
    pub style: Option<&'static str>,
    pub size: Option<&'static str>,
    pub configuration: Option<&'static str>,
    pub building: Option<&'static str>,
    pub rooms: &'static [TemplateRoom],
}

const fn room(name: &'static str, color: &'static str, text: &'static str) -> TemplateRoom {
    TemplateRoom { name, placeholder_color: color, text }
}

/// The full catalog, in display order.
pub const CATALOG: &[Template] = &[
    Template {
        id: "northern_europe_modern_minimalist",
        name: "Northern Europe Modern Minimalist",
        color: "f3f4f6",
        style: Some("Modern Minimalist"),
        size: Some("28m²"),
        configuration: Some("2 bedrooms, 1 bathroom"),
        building: Some("Scandinavian Apartment"),
        rooms: &[
            room("Living room", "f3f4f6", "Living room"),
            room("Kitchen", "f3f4f6", "Kitchen"),
            room("Master room", "f3f4f6", "Master room"),
            room("Guest room", "f3f4f6", "Guest room"),
            room("Bathroom", "f3f4f6", "Bathroom"),
        ],
    },
    Template {
        id: "light_luxury",
        name: "Light luxury",
        color: "e5e7eb",
        style: Some("Light luxury"),
        size: Some("25m²"),
        configuration: Some("1 bedroom, 1 bathroom"),
        building: Some("Modern Apartment"),
        rooms: &[
            room("Living room", "e5e7eb", "Living room"),
            room("Restaurant", "e5e7eb", "Restaurant"),
            room("Master room", "e5e7eb", "Master room"),
            room("Guest room", "e5e7eb", "Guest room"),
            room("Guest room 2", "e5e7eb", "Guest room 2"),
        ],
    },
    Template {
        id: "kitchen",
        name: "Kitchen",
        color: "f87171",
        style: None,
        size: None,
        configuration: None,
        building: None,
        rooms: &[
            room("Cooking Zone", "e11d48", "Stove Area"),
            room("Dining Nook", "facc15", "Breakfast Bar"),
            room("Pantry", "fb923c", "Storage"),
            room("Island", "a16207", "Center Island"),
        ],
    },
    Template {
        id: "living",
        name: "Living Room",
        color: "93c5fd",
        style: None,
        size: None,
        configuration: None,
        building: None,
        rooms: &[
            room("Living room", "22c55e", "Sofa View"),
            room("Restaurant", "0ea5e9", "Dining Area"),
            room("Master room", "f472b6", "Bedroom Suite"),
            room("Guest room", "6366f1", "Spare Bed"),
            room("Study", "10b981", "Home Office"),
            room("Balcony", "fb7185", "Outdoor View"),
        ],
    },
    Template {
        id: "bathroom",
        name: "Bathroom",
        color: "6ee7b7",
        style: None,
        size: None,
        configuration: None,
        building: None,
        rooms: &[room("Shower", "14b8a6", "Shower"), room("Vanity", "06b6d4", "Vanity")],
    },
    Template {
        id: "dressing",
        name: "Dressing Room",
        color: "fcd34d",
        style: None,
        size: None,
        configuration: None,
        building: None,
        rooms: &[
            room("Closet", "f97316", "Walk-in Closet"),
            room("Mirror Area", "a3e635", "Makeup Spot"),
        ],
    },
    Template {
        id: "washroom",
        name: "Washroom",
        color: "a5b4fc",
        style: None,
        size: None,
        configuration: None,
        building: None,
        rooms: &[
            room("Laundry", "8b5cf6", "Washer/Dryer"),
            room("Sink", "e879f9", "Utility Sink"),
        ],
    },
    Template {
        id: "storeroom",
        name: "Storeroom",
        color: "d8b4fe",
        style: None,
        size: None,
        configuration: None,
        building: None,
        rooms: &[room("Shelves", "c026d3", "Shelving")],
    },
    Template {
        id: "hall",
        name: "Hallway",
        color: "fbcfe8",
        style: None,
        size: None,
        configuration: None,
        building: None,
        rooms: &[room("Entrance", "be185d", "Foyer")],
    },
    Template {
        id: "terrace",
        name: "Terrace",
        color: "a7f3d0",
        style: None,
        size: None,
        configuration: None,
        building: None,
        rooms: &[room("Patio", "059669", "Outdoor Dining")],
    },
];

/// Look up a template by id.
#[must_use]
pub fn find(id: &str) -> Option<&'static Template> {
    CATALOG.iter().find(|t| t.id == id)
}
