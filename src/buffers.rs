//! Indexed vertex/index buffer extraction, the output boundary toward a
//! mesh-building consumer.

use crate::solid::Solid;
use crate::vertex::Vertex;
use hashbrown::HashMap;
use std::fmt::Debug;

impl<S: Clone + Send + Sync + Debug> Solid<S> {
    /// Flatten the solid into an indexed triangle buffer: fan-triangulate
    /// every polygon and deduplicate vertices by exact position+normal
    /// equality.
    ///
    /// Two vertices merge only when all six coordinates match bit-for-bit,
    /// so faces meeting at a hard edge keep their own normals while
    /// smooth-shaded neighbors share entries.
    pub fn to_buffers(&self) -> (Vec<Vertex>, Vec<[u32; 3]>) {
        let mut vertices: Vec<Vertex> = Vec::new();
        let mut lookup: HashMap<Vertex, u32> = HashMap::new();
        let mut indices: Vec<[u32; 3]> = Vec::new();

        let mut index_of = |v: &Vertex, vertices: &mut Vec<Vertex>| -> u32 {
            *lookup.entry(v.clone()).or_insert_with(|| {
                let idx = vertices.len() as u32;
                vertices.push(v.clone());
                idx
            })
        };

        for poly in &self.polygons {
            for tri in poly.triangulate() {
                let i0 = index_of(&tri[0], &mut vertices);
                let i1 = index_of(&tri[1], &mut vertices);
                let i2 = index_of(&tri[2], &mut vertices);
                indices.push([i0, i1, i2]);
            }
        }

        (vertices, indices)
    }
}
