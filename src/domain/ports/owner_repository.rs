use crate::domain::entities::owner::Owner;
use crate::domain::error::DomainError;

pub trait OwnerRepository: Send + Sync {
    fn add(&self, owner: &Owner) -> Result<(), DomainError>;
    fn get(&self, id: &str) -> Result<Option<Owner>, DomainError>;
    fn find_by_name(&self, name: &str) -> Result<Option<Owner>, DomainError>;
}
