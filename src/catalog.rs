use crate::foundation::error::{FolioError, FolioResult};

/// One artwork shown as a scroll panel. Immutable once the catalog is built.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ArtworkRecord {
    /// Image path or URL.
    pub src: String,
    /// Title shown in the panel.
    pub title: String,
    /// Year of creation.
    pub year: String,
    /// Materials.
    pub medium: String,
    /// Free-text description.
    pub description: String,
    /// Technique note.
    pub technique: String,
    /// Physical size, e.g. `"120 × 90 cm"`.
    pub size: String,
    /// Position in the page (0-based).
    pub ordinal: usize,
}

/// Ordered list of artworks.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    records: Vec<ArtworkRecord>,
}

impl Catalog {
    /// Build and validate a catalog. Ordinals must be `0..n` in order.
    pub fn new(records: Vec<ArtworkRecord>) -> FolioResult<Self> {
        let catalog = Self { records };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse a JSON array of records.
    pub fn from_json(json: &str) -> FolioResult<Self> {
        let records: Vec<ArtworkRecord> = serde_json::from_str(json)?;
        Self::new(records)
    }

    /// Check ordinals and required fields.
    pub fn validate(&self) -> FolioResult<()> {
        for (i, r) in self.records.iter().enumerate() {
            if r.ordinal != i {
                return Err(FolioError::validation(format!(
                    "artwork '{}' has ordinal {} but sits at position {i}",
                    r.title, r.ordinal
                )));
            }
            if r.title.trim().is_empty() {
                return Err(FolioError::validation(format!(
                    "artwork at position {i} has an empty title"
                )));
            }
            if r.src.trim().is_empty() {
                return Err(FolioError::validation(format!(
                    "artwork '{}' has no image source",
                    r.title
                )));
            }
        }
        Ok(())
    }

    /// Records in page order.
    pub fn records(&self) -> &[ArtworkRecord] {
        &self.records
    }

    /// Record at `ordinal`.
    pub fn get(&self, ordinal: usize) -> Option<&ArtworkRecord> {
        self.records.get(ordinal)
    }

    /// Number of artworks.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when there are no artworks.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The six mineral-art pieces shipped with the site.
    pub fn builtin() -> Self {
        const PIECES: [(&str, &str, &str, &str, &str, &str, &str); 6] = [
            (
                "/images/art1.jpg",
                "Mineral Genesis",
                "2024",
                "Iron Ore, Manganese & Acrylic on Canvas",
                "An exploration of the primordial forces that shaped the earth's crust, using the very minerals of Jharkhand.",
                "Mixed mineral pigments with dimensional texturing",
                "120 × 90 cm",
            ),
            (
                "/images/art2.jpg",
                "Chotanagpur Dreams",
                "2024",
                "Bauxite, Mica & Coal Dust on Canvas",
                "A tribute to the mining heritage of Jharkhand, where ancient earth meets contemporary expression.",
                "Layered mineral application with coarse texturing",
                "150 × 100 cm",
            ),
            (
                "/images/art3.jpg",
                "Prehistoric Echoes",
                "2023",
                "Ochre, Kaolin & Earth Dust on Canvas",
                "Inspired by the ancient rock paintings of Jharkhand, bridging millennia through mineral art.",
                "Traditional ochre pigments with modern acrylic binding",
                "100 × 120 cm",
            ),
            (
                "/images/art4.jpg",
                "Chakradharpur Memories",
                "2023",
                "Hematite, Chrome & Wooden Dust on Canvas",
                "A nostalgic journey to the artist's birthplace, rendered in the minerals of his homeland.",
                "Natural hematite with dimensional wood dust integration",
                "110 × 85 cm",
            ),
            (
                "/images/art5.jpg",
                "Industrial Meditation",
                "2024",
                "Manganese, Graphite & Ash on Canvas",
                "The intersection of industry and nature, where mining landscapes become abstract poetry.",
                "Graphite layering with manganese oxide patination",
                "140 × 95 cm",
            ),
            (
                "/images/art6.jpg",
                "Tribal Abstractions",
                "2023",
                "Mica, Cadmium & Coir on Canvas",
                "Ancient tribal motifs reimagined through the lens of contemporary mineral artistry.",
                "Mica flake integration with natural fiber textures",
                "130 × 100 cm",
            ),
        ];

        let records = PIECES
            .iter()
            .enumerate()
            .map(
                |(ordinal, (src, title, year, medium, description, technique, size))| {
                    ArtworkRecord {
                        src: (*src).to_string(),
                        title: (*title).to_string(),
                        year: (*year).to_string(),
                        medium: (*medium).to_string(),
                        description: (*description).to_string(),
                        technique: (*technique).to_string(),
                        size: (*size).to_string(),
                        ordinal,
                    }
                },
            )
            .collect();
        Self { records }
    }
}

#[cfg(test)]
#[path = "../tests/unit/catalog.rs"]
mod tests;
