// Flat per-body records for an external renderer

use glam::Vec2;

use super::body::{Body, BodyKind};

pub const KIND_ENTITY: u32 = 0;
pub const KIND_CONCRETE: u32 = 1;

/// One body as the host draws it
///
/// Plain-old-data so a slice can be uploaded as an instance buffer without
/// conversion.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BodyInstance {
    pub position: Vec2,
    pub size: Vec2,
    pub velocity: Vec2,
    /// `KIND_ENTITY` or `KIND_CONCRETE`
    pub kind: u32,
    _pad: u32,
}

impl BodyInstance {
    pub fn is_entity(&self) -> bool {
        self.kind == KIND_ENTITY
    }
}

impl From<&Body> for BodyInstance {
    fn from(body: &Body) -> Self {
        let kind = match body.kind() {
            BodyKind::Entity(_) => KIND_ENTITY,
            BodyKind::Concrete => KIND_CONCRETE,
        };
        Self {
            position: body.position(),
            size: body.hitbox(),
            velocity: body.velocity(),
            kind,
            _pad: 0,
        }
    }
}

/// View a slice of instances as raw bytes for upload
pub fn instance_bytes(instances: &[BodyInstance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_layout() {
        assert_eq!(std::mem::size_of::<BodyInstance>(), 32);
    }

    #[test]
    fn test_instance_from_body() {
        let mut body = Body::concrete(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0)).unwrap();
        body.set_vel_x(0.5);

        let instance = BodyInstance::from(&body);
        assert_eq!(instance.position, Vec2::new(1.0, 2.0));
        assert_eq!(instance.size, Vec2::new(3.0, 4.0));
        assert_eq!(instance.velocity, Vec2::new(0.5, 0.0));
        assert_eq!(instance.kind, KIND_CONCRETE);
        assert!(!instance.is_entity());
    }

    #[test]
    fn test_instances_cast_to_bytes() {
        let body = Body::entity(Vec2::new(2.5, 0.0), Vec2::ONE, 1.0).unwrap();
        let instances = [BodyInstance::from(&body), BodyInstance::from(&body)];

        let bytes = instance_bytes(&instances);
        assert_eq!(bytes.len(), 64);
        assert_eq!(&bytes[0..4], &2.5_f32.to_ne_bytes());
        assert_eq!(&bytes[24..28], &KIND_ENTITY.to_ne_bytes());
    }
}
