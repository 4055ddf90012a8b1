//! One visitor per element kind.

mod aspect;
mod characteristic;
mod constraint;
mod entity;
mod entity_instance;
mod event;
mod operation;
mod property;
mod unit;

pub use aspect::AspectVisitor;
pub use characteristic::CharacteristicVisitor;
pub use constraint::ConstraintVisitor;
pub use entity::EntityVisitor;
pub use entity_instance::EntityInstanceVisitor;
pub use event::EventVisitor;
pub use operation::OperationVisitor;
pub use property::PropertyVisitor;
pub use unit::UnitVisitor;
