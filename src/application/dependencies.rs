use crate::ports::*;
use std::sync::Arc;

/// サービスの依存関係
///
/// 振る舞いは持たず、各サービス関数に引数として渡す。
/// テストではインメモリ実装に差し替える。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub booking_repository: Arc<dyn BookingRepository>,
    pub schedule_repository: Arc<dyn ScheduleRepository>,
    pub user_repository: Arc<dyn UserRepository>,
    pub field_directory: Arc<dyn FieldDirectory>,
}
