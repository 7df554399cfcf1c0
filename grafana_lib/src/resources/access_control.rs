//! Fine-grained access control: roles, role assignments, and built-in role
//! assignments.

use crate::client::Client;
use crate::context::Context;
use crate::error::Error;
use crate::helpers::segment;
use crate::http::Request;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const ROLES: &str = "/api/access-control/roles";
const BUILTIN_ROLES: &str = "/api/access-control/builtin-roles";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Role {
    pub version: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub uid: String,
    pub name: String,
    pub description: String,
    pub global: bool,
    pub group: String,
    pub display_name: String,
    pub hidden: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<Permission>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Permission {
    pub action: String,
    pub scope: String,
}

/// Users, teams, and service accounts holding a role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleAssignments {
    pub role_uid: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub teams: Vec<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub service_accounts: Vec<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuiltinRoleAssignment {
    #[serde(rename = "builtInRole")]
    pub builtin_role: String,
    pub role_uid: String,
    pub global: bool,
}

fn role_path(uid: &str) -> String {
    format!("{}/{}", ROLES, segment(uid))
}

impl Client {
    pub async fn role(&self, ctx: &Context, uid: &str) -> Result<Role, Error> {
        self.dispatch(ctx, Request::get(role_path(uid))).await
    }

    pub async fn new_role(&self, ctx: &Context, role: &Role) -> Result<Role, Error> {
        let req = Request::post(ROLES).json(role)?;
        self.dispatch(ctx, req).await
    }

    pub async fn update_role(&self, ctx: &Context, role: &Role) -> Result<(), Error> {
        let req = Request::put(role_path(&role.uid)).json(role)?;
        self.dispatch_empty(ctx, req).await
    }

    pub async fn delete_role(&self, ctx: &Context, uid: &str, global: bool) -> Result<(), Error> {
        let req = Request::delete(role_path(uid)).query("global", global);
        self.dispatch_empty(ctx, req).await
    }

    pub async fn role_assignments(&self, ctx: &Context, uid: &str) -> Result<RoleAssignments, Error> {
        let path = format!("{}/assignments", role_path(uid));
        self.dispatch(ctx, Request::get(path)).await
    }

    /// Replace the full set of assignments for `assignments.role_uid`.
    pub async fn update_role_assignments(
        &self,
        ctx: &Context,
        assignments: &RoleAssignments,
    ) -> Result<RoleAssignments, Error> {
        let path = format!("{}/assignments", role_path(&assignments.role_uid));
        let req = Request::put(path).json(assignments)?;
        self.dispatch(ctx, req).await
    }

    /// Roles assigned to each built-in role (`Viewer`, `Editor`, ...).
    pub async fn builtin_role_assignments(
        &self,
        ctx: &Context,
    ) -> Result<HashMap<String, Vec<Role>>, Error> {
        self.dispatch(ctx, Request::get(BUILTIN_ROLES)).await
    }

    pub async fn new_builtin_role_assignment(
        &self,
        ctx: &Context,
        assignment: &BuiltinRoleAssignment,
    ) -> Result<BuiltinRoleAssignment, Error> {
        let req = Request::post(BUILTIN_ROLES).json(assignment)?;
        self.dispatch(ctx, req).await
    }

    pub async fn delete_builtin_role_assignment(
        &self,
        ctx: &Context,
        assignment: &BuiltinRoleAssignment,
    ) -> Result<(), Error> {
        let path = format!(
            "{}/{}/roles/{}",
            BUILTIN_ROLES,
            segment(&assignment.builtin_role),
            segment(&assignment.role_uid)
        );
        let req = Request::delete(path)
            .query("global", assignment.global)
            .json(assignment)?;
        self.dispatch_empty(ctx, req).await
    }
}
