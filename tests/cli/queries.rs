use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{CliTest, assert_written};

#[test]
fn test_query_map() -> Result<()> {
    let test = CliTest::with_project(&[(
        "src/features/todos/api.ts",
        r#"
export const useTodos = () =>
  useQuery({ queryKey: ["todos"], queryFn: fetchTodos, staleTime: 1000 });

export const useSave = () => useMutation({ mutationFn: saveTodo });

export const useLegacy = (id: number) => useQuery(["todo", id], () => fetchTodo(id));
"#,
    )])?;

    let output = test.run("queries")?;
    assert_written(&test, &output, "Query map", "queries.json");

    let mut queries = test.read_json("docs/inventory/queries.json")?;
    let records = queries.as_array_mut().unwrap();
    for record in records.iter_mut() {
        let id = record["id"].as_str().unwrap();
        assert!(id.starts_with("src/features/todos/api.ts:"), "{}", id);
        record.as_object_mut().unwrap().remove("id");
    }

    assert_eq!(
        queries,
        json!([
            {
                "filePath": "src/features/todos/api.ts",
                "hook": "useQuery",
                "queryKey": "[\"todos\"]",
                "options": { "staleTime": "1000" }
            },
            {
                "filePath": "src/features/todos/api.ts",
                "hook": "useMutation",
                "options": { "mutationFn": "saveTodo" }
            },
            {
                "filePath": "src/features/todos/api.ts",
                "hook": "useQuery",
                "queryKey": "\"todo\", id",
                "options": {}
            }
        ])
    );

    Ok(())
}
