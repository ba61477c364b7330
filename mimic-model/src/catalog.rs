use crate::{RequestCategory, RequestItem, RequestSpec};
use serde_json::json;

const BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Read-only collection of request items steps are created from
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<RequestItem>,
}

impl Catalog {
    pub fn new(items: Vec<RequestItem>) -> Self {
        Self { items }
    }

    /// The built-in example catalog.
    pub fn builtin() -> Self {
        Self::new(vec![
            item(
                "ui-1",
                "Load Dashboard",
                "Fetch dashboard data and metrics",
                RequestCategory::Ui,
                RequestSpec::get(format!("{BASE_URL}/users")),
            ),
            item(
                "ui-2",
                "Refresh Feed",
                "Reload the main content feed",
                RequestCategory::Ui,
                RequestSpec::get(format!("{BASE_URL}/posts?_limit=5")),
            ),
            item(
                "ui-3",
                "Load Notifications",
                "Fetch user notifications",
                RequestCategory::Ui,
                RequestSpec::get(format!("{BASE_URL}/comments?_limit=5")),
            ),
            item(
                "api-1",
                "Get Users",
                "Fetch all users from the API",
                RequestCategory::Api,
                RequestSpec::get(format!("{BASE_URL}/users")),
            ),
            item(
                "api-2",
                "Create Post",
                "Create a new post via API",
                RequestCategory::Api,
                RequestSpec::post(
                    format!("{BASE_URL}/posts"),
                    json!({
                        "title": "New Post",
                        "body": "This is the post content",
                        "userId": 1
                    }),
                ),
            ),
            item(
                "api-3",
                "Get Todos",
                "Fetch todo items from API",
                RequestCategory::Api,
                RequestSpec::get(format!("{BASE_URL}/todos?_limit=5")),
            ),
            item(
                "api-4",
                "Update Profile",
                "Update user profile data",
                RequestCategory::Api,
                RequestSpec::post(
                    format!("{BASE_URL}/users"),
                    json!({
                        "name": "Updated Name",
                        "email": "updated@example.com"
                    }),
                ),
            ),
            item(
                "pay-1",
                "Check Balance",
                "Retrieve current account balance",
                RequestCategory::Payment,
                RequestSpec::get(format!("{BASE_URL}/users/1")),
            ),
            item(
                "pay-2",
                "Process Payment",
                "Submit a payment transaction",
                RequestCategory::Payment,
                RequestSpec::post(
                    format!("{BASE_URL}/posts"),
                    json!({
                        "amount": 99.99,
                        "currency": "GBP",
                        "description": "Order payment"
                    }),
                ),
            ),
            item(
                "pay-3",
                "Refund Order",
                "Process a refund for an order",
                RequestCategory::Payment,
                RequestSpec::post(
                    format!("{BASE_URL}/posts"),
                    json!({
                        "orderId": "12345",
                        "amount": 49.99,
                        "reason": "Customer request"
                    }),
                ),
            ),
        ])
    }

    pub fn items(&self) -> &[RequestItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&RequestItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn by_category(
        &self,
        category: RequestCategory,
    ) -> impl Iterator<Item = &RequestItem> {
        self.items
            .iter()
            .filter(move |item| item.category == category)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn item(
    id: &str,
    name: &str,
    description: &str,
    category: RequestCategory,
    request: RequestSpec,
) -> RequestItem {
    RequestItem {
        id: id.to_string(),
        name: name.to_string(),
        description: Some(description.to_string()),
        category,
        request,
    }
}
