//! Wire representations for the Admin REST API.
//!
//! These mirror the server's representation payloads. Every struct keeps
//! unmodeled fields in a flattened `extra` map so that a fetched
//! representation can be mutated and sent back without dropping server
//! state (read-modify-write on an explicit snapshot).

mod client;
mod flow;
mod group;
mod idp;
mod realm;
mod user;

pub use client::{ClientRepresentation, ClientScopeRepresentation, ProtocolMapperRepresentation};
pub use flow::{
    AuthenticationExecutionInfoRepresentation, AuthenticationFlowRepresentation,
    AuthenticatorConfigRepresentation, NewFlowExecution,
};
pub use group::GroupRepresentation;
pub use idp::{IdentityProviderMapperRepresentation, IdentityProviderRepresentation};
pub use realm::RealmRepresentation;
pub use user::{CredentialRepresentation, UserRepresentation};
