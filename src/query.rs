use crate::models::Query;

/// Request parameters for a query, in the order they are sent.
pub fn query_params(q: &Query) -> Vec<(&'static str, String)> {
    let mut params = Vec::with_capacity(6);
    if let Some(search) = q.query.as_deref().filter(|s| !s.is_empty()) {
        params.push(("search_query", search.to_string()));
    }
    if let Some(ids) = &q.id_list {
        params.push(("id_list", ids.join(",")));
    }
    params.push(("start", q.start.to_string()));
    params.push(("max_results", q.max.to_string()));
    if let Some(sort_by) = q.sort_by {
        params.push(("sortBy", sort_by.as_str().to_string()));
    }
    if let Some(sort_order) = q.sort_order {
        params.push(("sortOrder", sort_order.as_str().to_string()));
    }
    params
}
