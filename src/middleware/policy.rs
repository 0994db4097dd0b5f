//! Access policies.
//!
//! Every endpoint applies its policy in three steps:
//!
//! 1. [`Policy::has_permission`] on the collection (403 on failure),
//! 2. a lookup restricted to the actor's [`Scope`] (404 when absent),
//! 3. [`Policy::has_object_permission`] on the found entity (403 on failure).
//!
//! List endpoints push the same scope into SQL, so a listing only ever
//! contains rows the object check would admit.

use axum::http::Method;
use chrono::NaiveDate;
use classroom_core::AppError;
use classroom_models::{Enrollment, ResourceRecord, Section, Student};
use uuid::Uuid;

use crate::metrics::track_access_denied;
use crate::middleware::auth::Actor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn is_read(self) -> bool {
        self == Operation::Read
    }

    /// GET, HEAD and OPTIONS are reads.
    pub fn from_method(method: &Method) -> Self {
        match *method {
            Method::GET | Method::HEAD | Method::OPTIONS => Operation::Read,
            Method::POST => Operation::Create,
            Method::DELETE => Operation::Delete,
            _ => Operation::Update,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Operation::Read => "read",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

/// Which rows an actor may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    All,
    Student(Uuid),
    Nothing,
}

impl Scope {
    /// Value to bind as the student filter of a scoped query: `Some(None)` is
    /// unrestricted, `Some(Some(id))` restricts to one student and `None`
    /// means the query can be skipped because nothing is visible.
    pub fn student_filter(self) -> Option<Option<Uuid>> {
        match self {
            Scope::All => Some(None),
            Scope::Student(id) => Some(Some(id)),
            Scope::Nothing => None,
        }
    }
}

pub trait Policy<T: ?Sized> {
    fn has_permission(&self, actor: &Actor, op: Operation) -> bool;

    fn has_object_permission(&self, actor: &Actor, op: Operation, target: &T) -> bool;
}

/// Entities that belong to an account, directly or through their student.
pub trait OwnedBy {
    fn is_owned_by(&self, actor: &Actor) -> bool;
}

impl OwnedBy for Student {
    fn is_owned_by(&self, actor: &Actor) -> bool {
        self.user_id == actor.user_id
    }
}

impl OwnedBy for Enrollment {
    fn is_owned_by(&self, actor: &Actor) -> bool {
        actor.student_id() == Some(self.student_id)
    }
}

pub struct AdminOnly;

impl<T: ?Sized> Policy<T> for AdminOnly {
    fn has_permission(&self, actor: &Actor, _op: Operation) -> bool {
        actor.is_staff
    }

    fn has_object_permission(&self, actor: &Actor, _op: Operation, _target: &T) -> bool {
        actor.is_staff
    }
}

/// Staff may do anything; other authenticated actors may only read.
pub struct AdminOrReadOnly;

impl<T: ?Sized> Policy<T> for AdminOrReadOnly {
    fn has_permission(&self, actor: &Actor, op: Operation) -> bool {
        actor.is_staff || op.is_read()
    }

    fn has_object_permission(&self, actor: &Actor, op: Operation, _target: &T) -> bool {
        actor.is_staff || op.is_read()
    }
}

/// Staff may do anything; a student may read what it owns.
pub struct OwnerOrAdmin;

impl<T: OwnedBy + ?Sized> Policy<T> for OwnerOrAdmin {
    fn has_permission(&self, actor: &Actor, op: Operation) -> bool {
        actor.is_staff || op.is_read()
    }

    fn has_object_permission(&self, actor: &Actor, op: Operation, target: &T) -> bool {
        actor.is_staff || (op.is_read() && target.is_owned_by(actor))
    }
}

/// Staff may do anything; a student may read the sections it is enrolled in.
pub struct EnrolledStudentOrAdmin;

impl Policy<Section> for EnrolledStudentOrAdmin {
    fn has_permission(&self, actor: &Actor, op: Operation) -> bool {
        actor.is_staff || op.is_read()
    }

    fn has_object_permission(&self, actor: &Actor, op: Operation, target: &Section) -> bool {
        actor.is_staff || (op.is_read() && actor.is_enrolled_in(target.id))
    }
}

/// Staff may do anything; a student may read a resource of a section it is
/// enrolled in while the resource is visible on `today`.
pub struct EnrolledAndResourceAccessible {
    pub today: NaiveDate,
}

impl Policy<ResourceRecord> for EnrolledAndResourceAccessible {
    fn has_permission(&self, actor: &Actor, op: Operation) -> bool {
        actor.is_staff || op.is_read()
    }

    fn has_object_permission(
        &self,
        actor: &Actor,
        op: Operation,
        target: &ResourceRecord,
    ) -> bool {
        actor.is_staff
            || (op.is_read()
                && actor.is_enrolled_in(target.section_id)
                && target.is_visible_to_students(self.today))
    }
}

/// Collection-level check.
pub fn authorize<T: ?Sized, P: Policy<T>>(
    policy: &P,
    actor: &Actor,
    op: Operation,
) -> Result<(), AppError> {
    if policy.has_permission(actor, op) {
        Ok(())
    } else {
        track_access_denied(op.as_str());
        Err(AppError::forbidden(
            "You do not have permission to perform this action.",
        ))
    }
}

/// Object-level check on an entity already found inside the actor's scope.
pub fn authorize_object<T: ?Sized, P: Policy<T>>(
    policy: &P,
    actor: &Actor,
    op: Operation,
    target: &T,
) -> Result<(), AppError> {
    if policy.has_object_permission(actor, op, target) {
        Ok(())
    } else {
        track_access_denied(op.as_str());
        Err(AppError::forbidden(
            "You do not have permission to perform this action.",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::auth::tests::{admin, profileless, student_in};
    use chrono::Utc;
    use classroom_models::ResourceKind;

    const WRITES: [Operation; 3] = [Operation::Create, Operation::Update, Operation::Delete];

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn section(id: Uuid) -> Section {
        Section {
            id,
            program_id: Uuid::new_v4(),
            program_name: "Rust".to_string(),
            name: "Section A".to_string(),
            start_date: date(2025, 1, 1),
            completion_date: None,
            access_link: None,
            student_count: 1,
        }
    }

    fn resource(section_id: Uuid, draft: bool, pre_access: bool) -> ResourceRecord {
        ResourceRecord {
            id: Uuid::new_v4(),
            section_id,
            section_name: "Section A".to_string(),
            section_start_date: date(2025, 1, 1),
            kind: ResourceKind::Pdf,
            name: "Slides".to_string(),
            description: None,
            pre_access,
            draft,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn student_record(user_id: Uuid) -> Student {
        Student {
            id: Uuid::new_v4(),
            user_id,
            name: "Ana".to_string(),
            email: "ana@x.com".to_string(),
            phone: None,
        }
    }

    #[test]
    fn test_operation_from_method() {
        assert_eq!(Operation::from_method(&Method::GET), Operation::Read);
        assert_eq!(Operation::from_method(&Method::HEAD), Operation::Read);
        assert_eq!(Operation::from_method(&Method::OPTIONS), Operation::Read);
        assert_eq!(Operation::from_method(&Method::POST), Operation::Create);
        assert_eq!(Operation::from_method(&Method::PUT), Operation::Update);
        assert_eq!(Operation::from_method(&Method::PATCH), Operation::Update);
        assert_eq!(Operation::from_method(&Method::DELETE), Operation::Delete);
    }

    #[test]
    fn test_scope_student_filter() {
        let id = Uuid::new_v4();
        assert_eq!(Scope::All.student_filter(), Some(None));
        assert_eq!(Scope::Student(id).student_filter(), Some(Some(id)));
        assert_eq!(Scope::Nothing.student_filter(), None);
    }

    #[test]
    fn test_admin_only() {
        let target = ();
        assert!(Policy::<()>::has_permission(&AdminOnly, &admin(), Operation::Delete));
        assert!(!Policy::<()>::has_permission(&AdminOnly, &student_in(vec![]), Operation::Read));
        assert!(!AdminOnly.has_object_permission(&profileless(), Operation::Read, &target));
    }

    #[test]
    fn test_admin_or_read_only() {
        let student = student_in(vec![]);
        assert!(Policy::<()>::has_permission(&AdminOrReadOnly, &student, Operation::Read));
        for op in WRITES {
            assert!(!Policy::<()>::has_permission(&AdminOrReadOnly, &student, op));
            assert!(Policy::<()>::has_permission(&AdminOrReadOnly, &admin(), op));
        }
    }

    #[test]
    fn test_owner_or_admin_on_students() {
        let student = student_in(vec![]);
        let own = student_record(student.user_id);
        let other = student_record(Uuid::new_v4());

        assert!(OwnerOrAdmin.has_object_permission(&student, Operation::Read, &own));
        assert!(!OwnerOrAdmin.has_object_permission(&student, Operation::Read, &other));
        assert!(!OwnerOrAdmin.has_object_permission(&student, Operation::Update, &own));
        assert!(!Policy::<Student>::has_permission(&OwnerOrAdmin, &student, Operation::Create));
        assert!(OwnerOrAdmin.has_object_permission(&admin(), Operation::Delete, &other));
    }

    #[test]
    fn test_owner_or_admin_on_enrollments() {
        let student = student_in(vec![]);
        let own = Enrollment {
            id: Uuid::new_v4(),
            student_id: student.student_id().unwrap(),
            student_name: "Ana".to_string(),
            section_id: Uuid::new_v4(),
            section_name: "Section A".to_string(),
            enrolled_at: Utc::now(),
        };
        let foreign = Enrollment {
            student_id: Uuid::new_v4(),
            ..own.clone()
        };

        assert!(OwnerOrAdmin.has_object_permission(&student, Operation::Read, &own));
        assert!(!OwnerOrAdmin.has_object_permission(&student, Operation::Read, &foreign));
        assert!(!OwnerOrAdmin.has_object_permission(&profileless(), Operation::Read, &own));
    }

    #[test]
    fn test_enrolled_student_or_admin() {
        let section_id = Uuid::new_v4();
        let enrolled = student_in(vec![section_id]);
        let outsider = student_in(vec![Uuid::new_v4()]);
        let target = section(section_id);

        assert!(EnrolledStudentOrAdmin.has_object_permission(&enrolled, Operation::Read, &target));
        assert!(!EnrolledStudentOrAdmin.has_object_permission(&enrolled, Operation::Update, &target));
        assert!(!EnrolledStudentOrAdmin.has_object_permission(&outsider, Operation::Read, &target));
        assert!(!EnrolledStudentOrAdmin.has_object_permission(&profileless(), Operation::Read, &target));
        assert!(!EnrolledStudentOrAdmin.has_permission(&enrolled, Operation::Create));
        assert!(EnrolledStudentOrAdmin.has_object_permission(&admin(), Operation::Delete, &target));
    }

    #[test]
    fn test_resource_draft_hidden_from_enrolled_student() {
        let section_id = Uuid::new_v4();
        let enrolled = student_in(vec![section_id]);
        let policy = EnrolledAndResourceAccessible {
            today: date(2025, 2, 1),
        };

        let draft = resource(section_id, true, false);
        assert!(!policy.has_object_permission(&enrolled, Operation::Read, &draft));
        assert!(policy.has_object_permission(&admin(), Operation::Read, &draft));

        let published = resource(section_id, false, false);
        assert!(policy.has_object_permission(&enrolled, Operation::Read, &published));
        assert!(!policy.has_object_permission(&enrolled, Operation::Delete, &published));
    }

    #[test]
    fn test_resource_pre_access_before_start() {
        let section_id = Uuid::new_v4();
        let enrolled = student_in(vec![section_id]);
        let policy = EnrolledAndResourceAccessible {
            today: date(2024, 12, 1),
        };

        assert!(policy.has_object_permission(
            &enrolled,
            Operation::Read,
            &resource(section_id, false, true)
        ));
        assert!(!policy.has_object_permission(
            &enrolled,
            Operation::Read,
            &resource(section_id, false, false)
        ));
    }

    #[test]
    fn test_resource_requires_enrollment() {
        let policy = EnrolledAndResourceAccessible {
            today: date(2025, 2, 1),
        };
        let target = resource(Uuid::new_v4(), false, true);

        assert!(!policy.has_object_permission(&student_in(vec![]), Operation::Read, &target));
        assert!(!policy.has_object_permission(&profileless(), Operation::Read, &target));
    }

    #[test]
    fn test_authorize_maps_denial_to_forbidden() {
        let err = authorize::<(), _>(&AdminOnly, &student_in(vec![]), Operation::Read).unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::FORBIDDEN);
        assert!(authorize::<(), _>(&AdminOnly, &admin(), Operation::Read).is_ok());
    }
}
