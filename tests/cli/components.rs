use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{CliTest, assert_written};

#[test]
fn test_components_inventory() -> Result<()> {
    let test = CliTest::with_project(&[
        (
            "src/components/ui/Button.tsx",
            r#"
import { forwardRef } from "react";
import { Slot } from "@radix-ui/react-slot";

interface ButtonProps {
  label: string;
  size?: "sm" | "lg";
}

export const Button = forwardRef<HTMLButtonElement, ButtonProps>(
  ({ label, size = "sm" }, ref) => <button ref={ref}>{label}</button>
);
"#,
        ),
        (
            "src/pages/Home.tsx",
            r#"
import { useState } from "react";
import { useTranslation } from "react-i18next";
import { Button } from "@/components/ui/Button";

export default function Home() {
  const [open] = useState(false);
  return <Button label="Go" />;
}
"#,
        ),
        (
            "src/pages/Home.test.tsx",
            "export const HomeTest = () => <div />;",
        ),
        ("scripts/Tool.tsx", "export const Tool = () => <div />;"),
    ])?;

    let output = test.run("components")?;
    assert_written(&test, &output, "Component inventory", "components.json");

    let components = test.read_json("docs/inventory/components.json")?;
    assert_eq!(
        components,
        json!([
            {
                "name": "Button",
                "filePath": "src/components/ui/Button.tsx",
                "kind": "forwardRef",
                "category": "ui",
                "props": [
                    { "name": "label", "type": "string", "optional": false },
                    { "name": "size", "type": "\"sm\" | \"lg\"", "optional": true, "defaultValue": "\"sm\"" }
                ],
                "hooks": [],
                "usesDesignSystem": false,
                "usesPrimitives": true,
                "isMemo": false,
                "isForwardRef": true
            },
            {
                "name": "Home",
                "filePath": "src/pages/Home.tsx",
                "kind": "function",
                "category": "page",
                "props": [],
                "hooks": ["useState", "useTranslation"],
                "usesDesignSystem": true,
                "usesPrimitives": false,
                "isMemo": false,
                "isForwardRef": false
            }
        ])
    );

    Ok(())
}

#[test]
fn test_components_rerun_is_byte_identical() -> Result<()> {
    let test = CliTest::with_project(&[
        ("src/B.tsx", "export const B = memo(() => <b />);"),
        ("src/A.tsx", "export function A({ x }: { x: number }) { return <a />; }"),
    ])?;

    test.run("components")?;
    let first = test.read_file("docs/inventory/components.json")?;
    test.run("components")?;
    let second = test.read_file("docs/inventory/components.json")?;

    assert_eq!(first, second);
    assert!(first.ends_with("]\n"));
    Ok(())
}

#[test]
fn test_syntax_error_file_is_skipped() -> Result<()> {
    let test = CliTest::with_project(&[
        ("src/Broken.tsx", "export const Broken = () => <div>;"),
        ("src/Fine.tsx", "export const Fine = () => <div />;"),
    ])?;

    let output = test.run("components")?;
    assert_written(&test, &output, "Component inventory", "components.json");

    let components = test.read_json("docs/inventory/components.json")?;
    assert_eq!(components.as_array().map(Vec::len), Some(1));
    assert_eq!(components[0]["name"], "Fine");
    Ok(())
}
