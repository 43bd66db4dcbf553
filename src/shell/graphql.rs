use async_graphql::http::GraphiQLSource;
use async_graphql::{EmptySubscription, MergedObject, Schema};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{Extension, http::HeaderMap, response::Html};

use crate::modules::study_sessions::use_cases::leaderboard::inbound::graphql::LeaderboardQuery;
use crate::modules::study_sessions::use_cases::record_session::inbound::graphql::RecordSessionMutation;
use crate::modules::study_sessions::use_cases::weekly_totals::inbound::graphql::WeeklyTotalsQuery;
use crate::shell::auth::AuthenticatedUser;
use crate::shell::state::AppState;

#[derive(MergedObject, Default)]
pub struct QueryRoot(WeeklyTotalsQuery, LeaderboardQuery);

#[derive(MergedObject, Default)]
pub struct MutationRoot(RecordSessionMutation);

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn schema(state: AppState) -> AppSchema {
    Schema::build(QueryRoot::default(), MutationRoot::default(), EmptySubscription)
        .data(state)
        .finish()
}

/// Executes a request; the caller id, when present, is attached for resolvers
/// that need one.
pub async fn graphql(
    Extension(schema): Extension<AppSchema>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = req.into_inner();
    if let Ok(user) = AuthenticatedUser::from_headers(&headers) {
        request = request.data(user);
    }
    schema.execute(request).await.into()
}

pub async fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint("/gql").finish())
}
