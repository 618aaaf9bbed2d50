use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{CliTest, assert_written};

#[test]
fn test_route_map() -> Result<()> {
    let test = CliTest::with_project(&[(
        "src/router.tsx",
        r#"
import { createBrowserRouter } from "react-router-dom";

export const router = createBrowserRouter([
  {
    path: "/dashboard",
    element: <RequireAuth><Suspense><Dashboard /></Suspense></RequireAuth>,
    children: [{ path: "/dashboard/sub", lazy: () => import("./Sub") }],
  },
]);
"#,
    )])?;

    let output = test.run("routes")?;
    assert_written(&test, &output, "Route map", "routes.json");

    let routes = test.read_json("docs/inventory/routes.json")?;
    assert_eq!(
        routes,
        json!([
            {
                "id": "src/router.tsx:/dashboard",
                "path": "/dashboard",
                "element": "<RequireAuth><Suspense><Dashboard /></Suspense></RequireAuth>",
                "lazy": false,
                "filePath": "src/router.tsx",
                "guards": ["RequireAuth"],
                "wrappers": ["Suspense"],
                "children": [
                    {
                        "id": "src/router.tsx:/dashboard/sub",
                        "path": "/dashboard/sub",
                        "lazy": true,
                        "filePath": "src/router.tsx",
                        "guards": [],
                        "wrappers": []
                    }
                ]
            }
        ])
    );

    Ok(())
}

#[test]
fn test_no_router_writes_empty_map() -> Result<()> {
    let test = CliTest::with_project(&[("src/App.tsx", "export const App = () => <div />;")])?;

    let output = test.run("routes")?;
    assert_written(&test, &output, "Route map", "routes.json");

    assert_eq!(test.read_file("docs/inventory/routes.json")?, "[]\n");
    Ok(())
}

#[test]
fn test_routes_rerun_is_byte_identical() -> Result<()> {
    let test = CliTest::with_project(&[(
        "src/router.tsx",
        r#"
export const router = createBrowserRouter([
  { path: "/", element: <Layout><Home /></Layout> },
  { path: "/admin", element: <RequireAuth><Admin /></RequireAuth>, children: [{ index: true }] },
]);
"#,
    )])?;

    test.run("routes")?;
    let first = test.read_file("docs/inventory/routes.json")?;
    test.run("routes")?;
    let second = test.read_file("docs/inventory/routes.json")?;

    assert_eq!(first, second);
    assert!(first.ends_with("]\n"));
    Ok(())
}
