pub mod share;
pub mod task;
pub mod team;
pub mod user;

pub use share::{SharePermission, ShareTaskRequest, TaskShare};
pub use task::{
    CreateTaskRequest, EnrichedTask, GranteeInfo, Task, TaskFilters, TaskPriority, TaskStatus,
    UpdateTaskRequest,
};
pub use team::{CreateTeamRequest, Team, TeamInfo, UpdateTeamRequest};
pub use user::{CreatorInfo, User};
