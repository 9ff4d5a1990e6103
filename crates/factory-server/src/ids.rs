pub(crate) fn generate_agent_id() -> String {
    uuid::Uuid::now_v7().simple().to_string()
}
